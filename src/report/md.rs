use crate::types::report::{rank_label, score_percentage, ReportDocument};

pub fn to_markdown(document: &ReportDocument) -> String {
    let report = &document.report;
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", document.title()));

    if let Some(subject) = &document.subject {
        output.push_str(&format!(
            "- Student: {} ({})\n- School: {}\n- Grade: {}\n",
            subject.name, subject.id, subject.school_name, subject.grade
        ));
    }
    output.push_str(&format!(
        "- Date: {}\n\n",
        document.generated_on.format("%B %-d, %Y")
    ));

    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "Interest code: **{}**\n\n",
        report.interest_code_string()
    ));
    if let Some(primary) = report.primary() {
        output.push_str(&format!("{}\n\n", primary.description));
    }
    let top_names = report
        .interest_code
        .iter()
        .filter_map(|code| report.details.get(code))
        .map(|profile| profile.name.as_str())
        .collect::<Vec<_>>();
    output.push_str(&format!("Top themes: {}\n\n", top_names.join(", ")));
    if !document.coverage.is_complete() {
        output.push_str(&format!(
            "> Answered {} of {} questions ({} unanswered, {} invalid).\n\n",
            document.coverage.answered,
            document.coverage.total,
            document.coverage.unanswered,
            document.coverage.invalid
        ));
    }

    output.push_str("## Interest Scores\n\n");
    output.push_str("| Code | Category | Score | % |\n|---|---|---|---|\n");
    for ranked in &report.sorted_scores {
        let name = report
            .details
            .get(&ranked.code)
            .map(|profile| profile.name.as_str())
            .unwrap_or_else(|| ranked.code.label());
        let marker = if report.is_top(ranked.code) { " *" } else { "" };
        output.push_str(&format!(
            "| {}{} | {} | {:.2} | {}% |\n",
            ranked.code,
            marker,
            name,
            ranked.score,
            score_percentage(ranked.score)
        ));
    }
    output.push('\n');

    output.push_str("## Top Themes\n\n");
    for (index, code) in report.interest_code.iter().enumerate() {
        let Some(profile) = report.details.get(code) else {
            continue;
        };
        output.push_str(&format!(
            "### {} ({}): {}\n\n{}\n\n",
            rank_label(index),
            code,
            profile.name,
            profile.description
        ));
        if !profile.majors.is_empty() {
            output.push_str(&format!(
                "- Good college majors: {}\n",
                profile.majors.join(", ")
            ));
        }
        for (label, value) in [
            ("Interests", &profile.interests),
            ("Activities", &profile.activities),
            ("Skills", &profile.skills),
            ("Values", &profile.values),
        ] {
            if !value.is_empty() {
                output.push_str(&format!("- {label}: {value}\n"));
            }
        }
        output.push('\n');
    }

    output.push_str("## Recommended Pathways\n\n");
    match report.primary() {
        Some(primary) if !primary.pathways.is_empty() => {
            for pathway in &primary.pathways {
                output.push_str(&format!("- {pathway}\n"));
            }
        }
        _ => output.push_str("- none\n"),
    }
    output.push('\n');

    output.push_str(&format!(
        "---\nContent version {} ({})\n",
        document.content_version,
        short_fingerprint(&document.content_fingerprint)
    ));

    output
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
