//! Build command presentation: per-job outcome table and registration payload.

use super::shared::{status_label, to_pretty_json, truncate};
use crate::cli::route::BuildReport;
use crate::error::ApiError;
use crate::wizard::WizardStep;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

const DETAIL_WIDTH: usize = 48;

pub fn format_build_text(report: &BuildReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["App", "Status", "Chars", "Detail"]);
    for job in &report.jobs {
        let detail = match &job.error {
            Some(error) => truncate(error, DETAIL_WIDTH),
            None => truncate(&job.prompt, DETAIL_WIDTH),
        };
        table.add_row(vec![
            job.item_name.clone(),
            status_label(job.status),
            job.text.chars().count().to_string(),
            detail,
        ]);
    }

    let mut output = format!(
        "{}\n{}\n{} of {} skills built\n",
        WizardStep::Build.description(),
        table,
        report.done_count(),
        report.jobs.len()
    );
    for path in &report.written {
        output.push_str(&format!("Wrote {}\n", path.display()));
    }
    for warning in &report.warnings {
        output.push_str(&format!("Warning: {}\n", warning));
    }
    if let Some(plan) = &report.registration {
        output.push_str(&format!(
            "\n{} (unsigned) for '{}' (node {}):\n",
            WizardStep::Register.description(),
            plan.agent_info.name,
            plan.node_url
        ));
        output.push_str(
            &to_pretty_json(&plan.transaction_payload).unwrap_or_else(|_| "{}".to_string()),
        );
        output.push('\n');
    }
    output
}

pub fn format_build_json(report: &BuildReport) -> Result<String, ApiError> {
    to_pretty_json(report)
}
