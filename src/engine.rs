use crate::content::ScoringContent;
use crate::types::answers::{parse_rating, AnswerSet};
use crate::types::category::Category;
use crate::types::report::{AnswerCoverage, RankedScore, Report, ReportDocument, Subject};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    sum: i64,
    count: u32,
}

/// Converts answer sets into RIASEC reports.
///
/// Holds only validated, read-only tables; `compute_report` is pure and can
/// be called from any number of threads at once.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    content: ScoringContent,
    key_prefix: String,
}

impl ScoringEngine {
    pub fn new(content: ScoringContent, key_prefix: impl Into<String>) -> Self {
        Self {
            content,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn content(&self) -> &ScoringContent {
        &self.content
    }

    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    pub fn compute_report(&self, answers: &AnswerSet) -> Report {
        let mut tallies: BTreeMap<Category, Tally> = Category::ordered()
            .into_iter()
            .map(|category| (category, Tally::default()))
            .collect();

        for (ordinal, category) in self.content.questions().iter() {
            let key = AnswerSet::question_key(&self.key_prefix, ordinal);
            let rating = answers.get(&key).and_then(parse_rating);
            if rating.is_none() && answers.get(&key).is_some() {
                tracing::debug!(question = %key, "answer is not a rating; counted as zero");
            }

            let tally = tallies.entry(category).or_default();
            // Zero and negative ratings are counted but add nothing.
            if let Some(value) = rating.filter(|value| *value > 0) {
                tally.sum = tally.sum.saturating_add(value);
            }
            tally.count += 1;
        }

        let scores: BTreeMap<Category, f64> = tallies
            .iter()
            .map(|(category, tally)| (*category, normalize(*tally)))
            .collect();

        let mut sorted_scores: Vec<RankedScore> = Category::ordered()
            .into_iter()
            .map(|code| RankedScore {
                code,
                score: scores.get(&code).copied().unwrap_or(0.0),
            })
            .collect();
        sorted_scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        let interest_code = sorted_scores
            .iter()
            .take(3)
            .map(|ranked| ranked.code)
            .collect();

        Report {
            scores,
            sorted_scores,
            interest_code,
            details: self.content.profiles().clone(),
        }
    }

    pub fn coverage(&self, answers: &AnswerSet) -> AnswerCoverage {
        let mut coverage = AnswerCoverage {
            total: self.content.questions().len(),
            ..AnswerCoverage::default()
        };
        for (ordinal, _) in self.content.questions().iter() {
            let key = AnswerSet::question_key(&self.key_prefix, ordinal);
            match answers.get(&key) {
                None => coverage.unanswered += 1,
                Some(value) => match parse_rating(value) {
                    Some(rating) if rating > 0 => coverage.answered += 1,
                    _ => coverage.invalid += 1,
                },
            }
        }
        coverage
    }

    /// Scores `answers` and wraps the result with what renderers need.
    pub fn document(
        &self,
        subject: Option<Subject>,
        answers: &AnswerSet,
        generated_on: NaiveDate,
    ) -> ReportDocument {
        ReportDocument {
            subject,
            generated_on,
            content_version: self.content.version().to_string(),
            content_fingerprint: self.content.fingerprint().to_string(),
            coverage: self.coverage(answers),
            report: self.compute_report(answers),
        }
    }
}

/// Average rating scaled by 10 and rounded to two decimals.
fn normalize(tally: Tally) -> f64 {
    if tally.count == 0 {
        return 0.0;
    }
    let average = tally.sum as f64 / f64::from(tally.count);
    (average * 10.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::all_profiles;
    use crate::content::QuestionMap;
    use crate::types::answers::DEFAULT_KEY_PREFIX;
    use serde_json::json;

    fn builtin_engine() -> ScoringEngine {
        let content = ScoringContent::builtin().expect("builtin content should load");
        ScoringEngine::new(content, DEFAULT_KEY_PREFIX)
    }

    fn engine_with_map(entries: BTreeMap<u32, Category>) -> ScoringEngine {
        let questions = QuestionMap::from_entries(entries).expect("map should be complete");
        let content =
            ScoringContent::new("test", questions, all_profiles()).expect("content should build");
        ScoringEngine::new(content, DEFAULT_KEY_PREFIX)
    }

    fn uniform_answers(count: u32, value: &str) -> AnswerSet {
        (1..=count)
            .map(|ordinal| (format!("q_{ordinal}"), value))
            .collect()
    }

    fn codes(categories: &[Category]) -> String {
        categories.iter().map(|c| c.code()).collect()
    }

    #[test]
    fn all_fives_score_fifty_everywhere() {
        let report = builtin_engine().compute_report(&uniform_answers(50, "5"));
        for category in Category::ordered() {
            assert_eq!(report.score(category), 50.0);
        }
    }

    #[test]
    fn missing_answers_score_zero_and_tie_break_canonically() {
        let report = builtin_engine().compute_report(&AnswerSet::new());
        assert!(report.scores.values().all(|score| *score == 0.0));
        assert_eq!(codes(&report.interest_code), "RIA");
        let sorted: Vec<Category> = report.sorted_scores.iter().map(|r| r.code).collect();
        assert_eq!(sorted, Category::ordered().to_vec());
    }

    #[test]
    fn realistic_answers_rank_realistic_first() {
        // Nine realistic questions, the rest spread over the other five.
        let realistic = [1, 5, 9, 18, 22, 30, 35, 46, 50];
        let others = [
            Category::Investigative,
            Category::Artistic,
            Category::Social,
            Category::Enterprising,
            Category::Conventional,
        ];
        let mut entries = BTreeMap::new();
        let mut next_other = 0;
        for ordinal in 1..=50u32 {
            if realistic.contains(&ordinal) {
                entries.insert(ordinal, Category::Realistic);
            } else {
                entries.insert(ordinal, others[next_other % others.len()]);
                next_other += 1;
            }
        }
        let engine = engine_with_map(entries);

        let answers: AnswerSet = (1..=50u32)
            .map(|ordinal| {
                let value = if realistic.contains(&ordinal) { "5" } else { "1" };
                (format!("q_{ordinal}"), value)
            })
            .collect();

        let report = engine.compute_report(&answers);
        assert_eq!(report.score(Category::Realistic), 50.0);
        for category in others {
            assert_eq!(report.score(category), 10.0);
        }
        assert_eq!(report.sorted_scores[0].code, Category::Realistic);
        assert_eq!(report.interest_code[0], Category::Realistic);
        assert_eq!(codes(&report.interest_code), "RIA");
    }

    #[test]
    fn malformed_answer_counts_toward_denominator() {
        let engine = builtin_engine();
        let baseline = uniform_answers(50, "5");
        let mut malformed = baseline.clone();
        // q_5 maps to Realistic, which has 8 questions.
        malformed.insert("q_5", "five");

        let expected = engine.compute_report(&baseline);
        let degraded = engine.compute_report(&malformed);

        assert_eq!(expected.score(Category::Realistic), 50.0);
        assert_eq!(degraded.score(Category::Realistic), 43.75);
        assert_eq!(degraded.score(Category::Social), 50.0);
    }

    #[test]
    fn zero_rating_is_treated_like_a_missing_answer() {
        let engine = builtin_engine();
        let mut zero = uniform_answers(50, "4");
        zero.insert("q_5", "0");
        let mut missing = uniform_answers(50, "4");
        missing.insert("q_5", json!(null));

        assert_eq!(engine.compute_report(&zero), engine.compute_report(&missing));
        assert_eq!(engine.compute_report(&zero).score(Category::Realistic), 35.0);
    }

    #[test]
    fn negative_ratings_add_nothing() {
        let engine = builtin_engine();
        let mut answers = uniform_answers(50, "2");
        answers.insert("q_5", "-3");
        assert_eq!(engine.compute_report(&answers).score(Category::Realistic), 17.5);
    }

    #[test]
    fn oversized_ratings_saturate_instead_of_overflowing() {
        let engine = builtin_engine();
        let mut answers = uniform_answers(50, "1");
        // q_5 and q_9 both map to Realistic.
        answers.insert("q_5", json!(i64::MAX));
        answers.insert("q_9", "9223372036854775807");

        let report = engine.compute_report(&answers);
        let realistic = report.score(Category::Realistic);
        assert!(realistic.is_finite() && realistic > 50.0);
        assert_eq!(report.interest_code[0], Category::Realistic);
        assert_eq!(report.score(Category::Social), 10.0);
    }

    #[test]
    fn scoring_from_several_threads_matches_a_single_call() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<ScoringEngine>();

        let engine = builtin_engine();
        let answers = uniform_answers(50, "4");
        let expected = engine.compute_report(&answers);

        let reports: Vec<Report> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| engine.compute_report(&answers)))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("scoring thread should finish"))
                .collect()
        });

        assert_eq!(reports.len(), 4);
        assert!(reports.iter().all(|report| *report == expected));
    }

    #[test]
    fn numeric_json_values_are_accepted() {
        let engine = builtin_engine();
        let answers: AnswerSet = (1..=50u32)
            .map(|ordinal| (format!("q_{ordinal}"), json!(3)))
            .collect();
        let report = engine.compute_report(&answers);
        assert!(report.scores.values().all(|score| *score == 30.0));
    }

    #[test]
    fn scores_round_to_two_decimals() {
        let engine = builtin_engine();
        let mut answers = uniform_answers(50, "5");
        // Conventional has 6 questions: 8, 11, 14, 21, 31, 45.
        answers.insert("q_8", "4");
        let report = engine.compute_report(&answers);
        // 29 / 6 * 10 = 48.333...
        assert_eq!(report.score(Category::Conventional), 48.33);
    }

    #[test]
    fn ratings_in_range_stay_within_bounds() {
        let engine = builtin_engine();
        let answers: AnswerSet = (1..=50u32)
            .map(|ordinal| (format!("q_{ordinal}"), json!((ordinal * 7 % 5) + 1)))
            .collect();
        let report = engine.compute_report(&answers);
        for score in report.scores.values() {
            assert!((10.0..=50.0).contains(score), "score {score} out of range");
        }
    }

    #[test]
    fn sorted_scores_are_complete_and_non_increasing() {
        let engine = builtin_engine();
        let mut answers = AnswerSet::new();
        answers.insert("q_3", "5");
        answers.insert("q_4", "2");
        answers.insert("q_12", "4");

        let report = engine.compute_report(&answers);
        assert_eq!(report.sorted_scores.len(), 6);
        assert!(report
            .sorted_scores
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
        let top: Vec<Category> = report
            .sorted_scores
            .iter()
            .take(3)
            .map(|ranked| ranked.code)
            .collect();
        assert_eq!(report.interest_code, top);
    }

    #[test]
    fn equal_scores_keep_canonical_order() {
        let engine = builtin_engine();
        let mut answers = AnswerSet::new();
        // Remaining four categories all tie at zero.
        answers.insert("q_2", "5");
        answers.insert("q_8", "5");

        let report = engine.compute_report(&answers);
        let social = report.score(Category::Social);
        let conventional = report.score(Category::Conventional);
        assert!(social < conventional);
        assert_eq!(report.interest_code[0], Category::Conventional);
        assert_eq!(report.interest_code[1], Category::Social);
        assert_eq!(report.interest_code[2], Category::Realistic);
    }

    #[test]
    fn repeated_calls_are_identical_and_leave_content_untouched() {
        let engine = builtin_engine();
        let before = engine.content().clone();
        let answers = uniform_answers(50, "3");

        let first = engine.compute_report(&answers);
        let _other = engine.compute_report(&uniform_answers(20, "1"));
        let second = engine.compute_report(&answers);

        assert_eq!(first, second);
        assert_eq!(engine.content(), &before);
        assert_eq!(&first.details, before.profiles());
    }

    #[test]
    fn custom_key_prefix_is_honoured() {
        let content = ScoringContent::builtin().expect("builtin content should load");
        let engine = ScoringEngine::new(content, "question_");
        let answers: AnswerSet = (1..=50u32)
            .map(|ordinal| (format!("question_{ordinal}"), "5"))
            .collect();
        assert!(engine
            .compute_report(&answers)
            .scores
            .values()
            .all(|score| *score == 50.0));
    }

    #[test]
    fn category_without_questions_scores_zero() {
        let engine = engine_with_map(BTreeMap::from([(1, Category::Social)]));
        let report = engine.compute_report(&uniform_answers(1, "4"));
        assert_eq!(report.score(Category::Social), 40.0);
        assert_eq!(report.score(Category::Realistic), 0.0);
        assert_eq!(report.interest_code[0], Category::Social);
    }

    #[test]
    fn coverage_distinguishes_missing_and_invalid_answers() {
        let engine = builtin_engine();
        let mut answers = uniform_answers(47, "4");
        answers.insert("q_1", "n/a");
        answers.insert("q_2", "0");

        let coverage = engine.coverage(&answers);
        assert_eq!(coverage.total, 50);
        assert_eq!(coverage.answered, 45);
        assert_eq!(coverage.invalid, 2);
        assert_eq!(coverage.unanswered, 3);
        assert!(!coverage.is_complete());
        assert!(engine.coverage(&uniform_answers(50, "1")).is_complete());
    }

    #[test]
    fn document_carries_content_identity() {
        let engine = builtin_engine();
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let document = engine.document(None, &uniform_answers(50, "2"), date);

        assert_eq!(document.content_version, engine.content().version());
        assert_eq!(document.content_fingerprint, engine.content().fingerprint());
        assert_eq!(document.generated_on, date);
        assert!(document.coverage.is_complete());
        assert_eq!(document.report.score(Category::Social), 20.0);
    }
}
