//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::{ConfigurationResult, GroupResult, ScalarStatResult, StudyResult};

/// Format a full study for human-readable terminal output.
pub fn format_study(study: &StudyResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("tmg-potentiation\n");
    output.push_str(&sep);
    output.push('\n');

    for warning in &study.warnings {
        output.push_str(&format!("  {} {}\n", "\u{26A0}".yellow(), warning));
    }

    for config in &study.configurations {
        output.push('\n');
        output.push_str(&format!("{}\n", config.kind.to_string().bold()));
        output.push_str(&format_configuration(config));
    }

    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format one grouping configuration.
fn format_configuration(config: &ConfigurationResult) -> String {
    let mut output = String::new();

    for group in &config.groups {
        output.push_str(&format_group(group));
    }
    for skip in &config.skipped {
        output.push_str(&format!(
            "  {} {}\n",
            format!("{}:", skip.key).dimmed(),
            skip.reason.yellow()
        ));
    }
    if config.groups.is_empty() && config.skipped.is_empty() {
        output.push_str("  (no groups)\n");
    }

    output
}

/// Format one group's scalar table and SPM summary.
fn format_group(group: &GroupResult) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "  {} ({} pairs)\n",
        group.key.to_string().bold(),
        group.n_pairs
    ));

    for row in &group.scalar {
        output.push_str(&format_scalar_row(row));
    }
    for omitted in &group.omitted_parameters {
        output.push_str(&format!("    {}\n", format!("omitted {}", omitted).dimmed()));
    }

    let spm = &group.spm;
    if spm.significant() {
        output.push_str(&format!(
            "    {} t* = {:.2}, FWHM = {:.1} nodes\n",
            "\u{2713} SPM significant".green().bold(),
            spm.threshold,
            spm.fwhm
        ));
        for cluster in &spm.clusters {
            output.push_str(&format!(
                "      cluster {:.1}\u{2013}{:.1} ms, peak t = {:.2}, p = {:.4}\n",
                cluster.start_time_ms, cluster.end_time_ms, cluster.peak_t, cluster.p_value
            ));
        }
    } else {
        output.push_str(&format!(
            "    {} (t* = {:.2})\n",
            "no suprathreshold clusters".dimmed(),
            spm.threshold
        ));
    }

    output
}

/// One line of the per-parameter table.
fn format_scalar_row(row: &ScalarStatResult) -> String {
    let change = match row.percent_change {
        Some(pct) if pct >= 0.0 => format!("+{:.1}%", pct).green().to_string(),
        Some(pct) => format!("{:.1}%", pct).red().to_string(),
        None => "n/a".dimmed().to_string(),
    };
    let p = if row.p_value.is_nan() {
        "n/a".dimmed().to_string()
    } else if row.p_value < 0.05 {
        format!("p = {:.4}", row.p_value).green().to_string()
    } else {
        format!("p = {:.4}", row.p_value)
    };

    format!(
        "    {:<20} {:>8.3} \u{2192} {:>8.3}  {:>8}  {}\n",
        row.parameter.to_string(),
        row.pre_mean,
        row.post_mean,
        change,
        p
    )
}
