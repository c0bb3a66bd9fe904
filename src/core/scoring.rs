use crate::core::filters::match_required_skills;
use crate::models::{CandidateSkill, JobRequiredSkill, MatchedSkill, Proficiency, ScoringWeights};

/// Upper bound of the match score range
pub const MAX_SCORE: f64 = 100.0;

/// Score reported when a candidate or job record cannot be resolved.
/// Callers rank and filter with the score, so a bad record degrades
/// to the bottom of the list instead of failing the whole listing.
pub const DEFAULT_SCORE: f64 = 0.0;

/// Calculate a match score (0-100) between a candidate and a job posting
///
/// Scoring formula:
/// ```text
/// score = (
///     skill_score * 0.70 +        # weighted required-skill coverage + proficiency bonus
///     experience_score * 0.30     # candidate experience vs. required years
/// ) * 100
/// ```
///
/// Returns the rounded score together with the names of the required
/// skills the candidate actually has.
pub fn calculate_match_score(
    required_skills: &[JobRequiredSkill],
    candidate_skills: &[CandidateSkill],
    experience_years: u8,
    experience_required: u8,
    weights: &ScoringWeights,
) -> (f64, Vec<String>) {
    let matched = match_required_skills(required_skills, candidate_skills);

    let skill_score = calculate_skill_score(required_skills, &matched, weights.proficiency_bonus);
    let experience_score = calculate_experience_score(experience_years, experience_required);

    let total = (skill_score * weights.skill + experience_score * weights.experience) * MAX_SCORE;

    let matched_names = matched.into_iter().map(|m| m.skill_name).collect();
    (round_score(total.clamp(0.0, MAX_SCORE)), matched_names)
}

/// Calculate the skill component (0-1)
///
/// Weighted coverage ratio over the job's required skills, where each
/// matched skill earns its importance weight plus a proficiency bonus
/// for levels above baseline. Capped at 1.0 so the bonus can never push
/// the component above its allotted share of the final score.
///
/// A job with no required skills is neutral: every candidate gets full
/// credit instead of being penalized for an empty requirement list.
#[inline]
fn calculate_skill_score(
    required_skills: &[JobRequiredSkill],
    matched: &[MatchedSkill],
    proficiency_bonus: f64,
) -> f64 {
    let total_weight: f64 = required_skills.iter().map(|r| r.importance.weight()).sum();
    if total_weight <= 0.0 {
        return 1.0;
    }

    let earned: f64 = matched
        .iter()
        .map(|m| {
            m.importance.weight() * (1.0 + proficiency_bonus * proficiency_excess(m.proficiency))
        })
        .sum();

    (earned / total_weight).min(1.0)
}

/// How far above baseline a proficiency level sits, normalized to 0-1
#[inline]
fn proficiency_excess(proficiency: Proficiency) -> f64 {
    let baseline = Proficiency::BASELINE.level() as f64;
    let max = Proficiency::Expert.level() as f64;

    ((proficiency.level() as f64 - baseline) / (max - baseline)).clamp(0.0, 1.0)
}

/// Calculate the experience component (0-1)
///
/// Full credit once the candidate meets the requirement; below it the
/// credit grows linearly with the ratio. Exceeding the requirement
/// never reduces the score, and a job asking for zero years is always
/// full credit.
#[inline]
fn calculate_experience_score(experience_years: u8, experience_required: u8) -> f64 {
    if experience_required == 0 {
        return 1.0;
    }

    (experience_years as f64 / experience_required as f64).min(1.0)
}

/// Round to one decimal for display stability
#[inline]
fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Importance;

    fn required(id: i64, name: &str, importance: Importance) -> JobRequiredSkill {
        JobRequiredSkill {
            skill_id: id,
            skill_name: name.to_string(),
            importance,
        }
    }

    fn skill(id: i64, name: &str, proficiency: Proficiency) -> CandidateSkill {
        CandidateSkill {
            skill_id: id,
            skill_name: name.to_string(),
            proficiency,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_partial_coverage_full_experience() {
        // Python (required) matched, SQL (preferred) missing:
        // coverage 2/3, experience full -> 0.7 * 66.67 + 0.3 * 100 = 76.7
        let job = vec![
            required(1, "Python", Importance::Required),
            required(2, "SQL", Importance::Preferred),
        ];
        let candidate = vec![skill(1, "Python", Proficiency::Intermediate)];

        let (score, matched) =
            calculate_match_score(&job, &candidate, 4, 2, &ScoringWeights::default());

        assert!(approx(score, 76.7), "expected 76.7, got {}", score);
        assert_eq!(matched, vec!["Python"]);
    }

    #[test]
    fn test_full_coverage_partial_experience() {
        // All skills matched, 2 of 5 required years:
        // 0.7 * 100 + 0.3 * 40 = 82.0
        let job = vec![
            required(1, "Python", Importance::Required),
            required(2, "SQL", Importance::Preferred),
        ];
        let candidate = vec![
            skill(1, "Python", Proficiency::Intermediate),
            skill(2, "SQL", Proficiency::Intermediate),
        ];

        let (score, _) = calculate_match_score(&job, &candidate, 2, 5, &ScoringWeights::default());

        assert!(approx(score, 82.0), "expected 82.0, got {}", score);
    }

    #[test]
    fn test_perfect_candidate_scores_max() {
        let job = vec![
            required(1, "Rust", Importance::Required),
            required(2, "Kubernetes", Importance::Preferred),
        ];
        let candidate = vec![
            skill(1, "Rust", Proficiency::Expert),
            skill(2, "Kubernetes", Proficiency::Intermediate),
        ];

        let (score, _) = calculate_match_score(&job, &candidate, 10, 5, &ScoringWeights::default());

        assert!(approx(score, MAX_SCORE));
    }

    #[test]
    fn test_no_required_skills_is_neutral() {
        // Skills-less job must not penalize candidates: only experience varies
        let (score, matched) =
            calculate_match_score(&[], &[], 3, 6, &ScoringWeights::default());

        assert!(approx(score, 85.0), "expected 85.0, got {}", score);
        assert!(matched.is_empty());
    }

    #[test]
    fn test_zero_skill_candidate() {
        let job = vec![required(1, "Go", Importance::Required)];

        let (score, matched) =
            calculate_match_score(&job, &[], 5, 5, &ScoringWeights::default());

        // Coverage 0, experience full -> 30.0
        assert!(approx(score, 30.0));
        assert!(matched.is_empty());
    }

    #[test]
    fn test_proficiency_bonus_rewards_expertise() {
        let job = vec![
            required(1, "Python", Importance::Required),
            required(2, "SQL", Importance::Required),
        ];
        let baseline = vec![skill(1, "Python", Proficiency::Intermediate)];
        let expert = vec![skill(1, "Python", Proficiency::Expert)];

        let (base_score, _) =
            calculate_match_score(&job, &baseline, 5, 5, &ScoringWeights::default());
        let (expert_score, _) =
            calculate_match_score(&job, &expert, 5, 5, &ScoringWeights::default());

        assert!(expert_score > base_score);
        // Half coverage plus full bonus on the matched half: 0.5 * 1.1 = 0.55
        assert!(approx(expert_score, 68.5), "got {}", expert_score);
    }

    #[test]
    fn test_bonus_cannot_exceed_skill_share() {
        // Expert everywhere with full coverage still caps at 100
        let job = vec![required(1, "Python", Importance::Required)];
        let candidate = vec![skill(1, "Python", Proficiency::Expert)];

        let (score, _) = calculate_match_score(&job, &candidate, 9, 3, &ScoringWeights::default());

        assert!(approx(score, MAX_SCORE));
    }

    #[test]
    fn test_adding_matched_skill_never_decreases() {
        let job = vec![
            required(1, "Python", Importance::Required),
            required(2, "SQL", Importance::Preferred),
            required(3, "Docker", Importance::Preferred),
        ];
        let mut candidate = vec![skill(1, "Python", Proficiency::Expert)];

        let (before, _) = calculate_match_score(&job, &candidate, 3, 3, &ScoringWeights::default());
        candidate.push(skill(2, "SQL", Proficiency::Beginner));
        let (after, _) = calculate_match_score(&job, &candidate, 3, 3, &ScoringWeights::default());

        assert!(after >= before, "{} < {}", after, before);
    }

    #[test]
    fn test_more_experience_never_decreases() {
        let job = vec![required(1, "Python", Importance::Required)];
        let candidate = vec![skill(1, "Python", Proficiency::Advanced)];

        let mut last = -1.0;
        for years in 0..12 {
            let (score, _) =
                calculate_match_score(&job, &candidate, years, 6, &ScoringWeights::default());
            assert!(score >= last, "score dropped at {} years", years);
            last = score;
        }
    }

    #[test]
    fn test_zero_required_experience_is_full_credit() {
        assert!(approx(calculate_experience_score(0, 0), 1.0));
        assert!(approx(calculate_experience_score(7, 0), 1.0));
    }

    #[test]
    fn test_score_stays_in_bounds() {
        let job = vec![
            required(1, "A", Importance::Required),
            required(2, "B", Importance::Required),
        ];
        let candidates = [
            vec![],
            vec![skill(1, "A", Proficiency::Beginner)],
            vec![
                skill(1, "A", Proficiency::Expert),
                skill(2, "B", Proficiency::Expert),
            ],
        ];

        for candidate in &candidates {
            for years in [0u8, 1, 5, 40] {
                let (score, _) =
                    calculate_match_score(&job, candidate, years, 5, &ScoringWeights::default());
                assert!((0.0..=MAX_SCORE).contains(&score));
            }
        }
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        assert!(approx(round_score(76.666_666), 76.7));
        assert!(approx(round_score(82.04), 82.0));
        assert!(approx(round_score(0.0), 0.0));
    }
}
