use crate::application::dto::ReviewResponse;
use crate::ports::outbound::ReviewFormatter;
use crate::review::domain::{
    Change, ClassificationResult, LicenseCategory, LicenseClassification, Severity,
};
use crate::shared::Result;

/// Markdown table header for vulnerable changes
const VULN_TABLE_HEADER: &str = "| Manifest | Package | Version | Severity | Advisory |\n";

/// Markdown table separator line for vulnerable changes
const VULN_TABLE_SEPARATOR: &str = "|----------|---------|---------|----------|----------|\n";

/// Markdown table header for license findings
const LICENSE_TABLE_HEADER: &str = "| Manifest | Package | Version | License |\n";

/// Markdown table separator line for license findings
const LICENSE_TABLE_SEPARATOR: &str = "|----------|---------|---------|---------|\n";

/// MarkdownFormatter adapter for the human-readable review summary
///
/// The output is suitable for a terminal or a pull request comment.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn severity_emoji(severity: Severity) -> &'static str {
        match severity {
            Severity::Critical => "🔴",
            Severity::High => "🟠",
            Severity::Moderate => "🟡",
            Severity::Low => "🟢",
        }
    }

    fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
        if count == 1 {
            singular
        } else {
            plural
        }
    }

    fn advisory_link(summary: &str, id: &str, url: &str) -> String {
        let text = if summary.trim().is_empty() { id } else { summary };
        let text = Self::escape_markdown_table_cell(text)
            .replace('[', "\\[")
            .replace(']', "\\]");
        if url.trim().is_empty() {
            text
        } else {
            format!("[{}]({})", text, url.replace(' ', "%20"))
        }
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String) {
        output.push_str("# Dependency Review\n\n");
    }

    fn render_status(&self, output: &mut String, response: &ReviewResponse) {
        let result = match response.result() {
            Some(result) => result,
            None => {
                output.push_str("ℹ️ No dependency changes found. Nothing to review.\n\n");
                return;
            }
        };

        if response.passed {
            output.push_str("✅ No vulnerabilities or license issues found.\n\n");
            return;
        }

        let mut reasons = Vec::new();
        if response.vulnerability_check_failed() {
            let count = result.vulnerable_changes.len();
            reasons.push(format!(
                "{} vulnerable {}",
                count,
                Self::plural(count, "package", "packages")
            ));
        }
        if response.license_check_failed() {
            let count = result.licenses.forbidden.len() + result.licenses.unresolved.len();
            reasons.push(format!(
                "{} license {}",
                count,
                Self::plural(count, "issue", "issues")
            ));
        }
        output.push_str(&format!(
            "❌ Dependency review found {}.\n\n",
            reasons.join(" and ")
        ));
    }

    fn render_vulnerabilities(
        &self,
        output: &mut String,
        response: &ReviewResponse,
        result: &ClassificationResult,
    ) {
        output.push_str("## Vulnerabilities\n\n");

        if !response.policy.vulnerability_check {
            output.push_str("*Vulnerability check is disabled; findings are informational.*\n\n");
        }

        if result.vulnerable_changes.is_empty() {
            output.push_str(&format!(
                "No vulnerable packages at severity {} or higher.\n\n",
                response.policy.fail_on_severity.effective_threshold()
            ));
            return;
        }

        let threshold = response.policy.fail_on_severity.effective_threshold();
        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);
        for change in &result.vulnerable_changes {
            self.render_vulnerability_rows(output, change, threshold);
        }
        output.push('\n');
    }

    /// One row per advisory at or above `threshold`; a change with several
    /// such advisories gets several rows
    fn render_vulnerability_rows(&self, output: &mut String, change: &Change, threshold: Severity) {
        for vuln in change
            .vulnerabilities()
            .iter()
            .filter(|vuln| vuln.severity() >= threshold)
        {
            output.push_str(&format!(
                "| {} | {} | {} | {} {} | {} |\n",
                Self::escape_markdown_table_cell(change.manifest()),
                Self::escape_markdown_table_cell(change.name()),
                Self::escape_markdown_table_cell(change.version()),
                Self::severity_emoji(vuln.severity()),
                vuln.severity(),
                Self::advisory_link(
                    vuln.advisory_summary(),
                    vuln.advisory_id(),
                    vuln.advisory_url()
                ),
            ));
        }
    }

    fn render_licenses(
        &self,
        output: &mut String,
        response: &ReviewResponse,
        licenses: &LicenseClassification,
    ) {
        output.push_str("## License Issues\n\n");

        if !response.policy.license_check {
            output.push_str("*License check is disabled; findings are informational.*\n\n");
        }

        if licenses.is_empty() {
            output.push_str("No license issues found.\n\n");
            return;
        }

        for category in [
            LicenseCategory::Forbidden,
            LicenseCategory::Unresolved,
            LicenseCategory::Unlicensed,
        ] {
            self.render_license_category(output, category, licenses.get(category));
        }
    }

    fn render_license_category(
        &self,
        output: &mut String,
        category: LicenseCategory,
        changes: &[Change],
    ) {
        if changes.is_empty() {
            return;
        }

        let title = match category {
            LicenseCategory::Forbidden => "Incompatible licenses",
            LicenseCategory::Unresolved => "Unrecognized license expressions",
            LicenseCategory::Unlicensed => "Unknown licenses",
        };
        output.push_str(&format!("### {} ({})\n\n", title, changes.len()));
        output.push_str(LICENSE_TABLE_HEADER);
        output.push_str(LICENSE_TABLE_SEPARATOR);

        for change in changes {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(change.manifest()),
                Self::escape_markdown_table_cell(change.name()),
                Self::escape_markdown_table_cell(change.version()),
                Self::escape_markdown_table_cell(change.license().unwrap_or("N/A")),
            ));
        }
        output.push('\n');
    }

    fn render_footer(&self, output: &mut String, response: &ReviewResponse) {
        output.push_str("---\n\n");
        output.push_str(&format!(
            "*Generated by {} {} at {}*\n",
            response.metadata.tool_name(),
            response.metadata.tool_version(),
            response.metadata.timestamp()
        ));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewFormatter for MarkdownFormatter {
    fn format(&self, response: &ReviewResponse) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output);
        self.render_status(&mut output, response);

        if let Some(result) = response.result() {
            self.render_vulnerabilities(&mut output, response, result);
            self.render_licenses(&mut output, response, &result.licenses);
        }

        self.render_footer(&mut output, response);
        Ok(output)
    }
}
