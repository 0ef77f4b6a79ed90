//! Regions command - list the built-in regions.

use console::style;
use skytrack::region::{Region, RegionTable};

/// Run the regions command.
pub fn run() {
    print!("{}", render(&RegionTable::builtin()));
}

fn render(table: &RegionTable) -> String {
    let mut out = format!(
        "{}\n",
        style(format!(
            "{:<10} {:<16} {:>16} {:>18} {:>20}",
            "KEY", "NAME", "LATITUDE", "LONGITUDE", "CENTER"
        ))
        .bold()
    );
    for region in table.iter() {
        out.push_str(&row(region));
        out.push('\n');
    }
    out
}

fn row(region: &Region) -> String {
    let b = &region.bounds;
    format!(
        "{:<10} {:<16} {:>16} {:>18} {:>20}",
        region.key,
        region.name,
        format!("{} .. {}", b.lat_min, b.lat_max),
        format!("{} .. {}", b.lng_min, b.lng_max),
        region.center.to_string()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_region() {
        console::set_colors_enabled(false);
        let out = render(&RegionTable::builtin());
        assert_eq!(out.lines().count(), 9);
        assert!(out.lines().nth(1).unwrap().starts_with("india"));
        assert!(out.contains("United Kingdom"));
        assert!(out.contains("-44 .. -10"));
    }
}
