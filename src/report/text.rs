use crate::types::category::Category;
use crate::types::report::{ReportDocument, MAX_SCORE};

const BAR_WIDTH: usize = 25;

/// Terminal summary with one bar per category in ranked order.
pub fn to_text(document: &ReportDocument) -> String {
    let report = &document.report;
    let mut output = String::new();
    output.push_str(&format!("{}\n", document.title()));
    output.push_str(&format!(
        "interest code: {}\n",
        report.interest_code_string()
    ));

    for ranked in &report.sorted_scores {
        let filled = ((ranked.score / MAX_SCORE) * BAR_WIDTH as f64)
            .round()
            .clamp(0.0, BAR_WIDTH as f64) as usize;
        let name = report
            .details
            .get(&ranked.code)
            .map(|profile| profile.name.as_str())
            .unwrap_or_else(|| ranked.code.label());
        output.push_str(&format!(
            "{} {:<13} {}{} {:>5.2}\n",
            ranked.code,
            name,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            ranked.score
        ));
    }

    // Fixed axis order, as on the hexagon chart.
    let profile = Category::ordered()
        .iter()
        .map(|category| format!("{category} {:.2}", report.score(*category)))
        .collect::<Vec<_>>();
    output.push_str(&format!("profile: {}\n", profile.join(" | ")));

    output.push_str(&format!(
        "answered {}/{}\n",
        document.coverage.answered, document.coverage.total
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_document;

    #[test]
    fn text_report_draws_proportional_bars() {
        let rendered = to_text(&sample_document());
        assert!(rendered.contains("interest code: ASR"));
        assert!(rendered.contains(&format!("A Artistic      {} 50.00", "#".repeat(25))));
        assert!(rendered.contains(&format!(
            "S Social        {}{} 40.00",
            "#".repeat(20),
            ".".repeat(5)
        )));
        assert!(rendered.contains(
            "profile: R 20.00 | I 20.00 | A 50.00 | S 40.00 | E 20.00 | C 20.00"
        ));
        assert!(rendered.contains("answered 50/50"));
    }
}
