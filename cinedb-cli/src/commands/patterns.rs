use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cinedb_query::canonical_patterns;

/// List the supported question shapes in matching order.
pub(crate) fn run_patterns() {
    log::info!(
        "{}",
        "Supported questions".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    for (i, pattern) in canonical_patterns().iter().enumerate() {
        log::info!(
            "  {}. {} {}",
            i + 1,
            pattern.pattern(),
            format!("-> {}", pattern.item_type()).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
