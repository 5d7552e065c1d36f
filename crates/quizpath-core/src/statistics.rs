//! Section percentages and need ranking.

use indexmap::IndexMap;

use crate::model::ModuleId;
use crate::session::SectionTally;

/// Fraction of a section answered correctly.
///
/// A section with no attempts scores exactly `0.0`: untested sections are
/// treated as fully unmet.
pub fn section_percentage(tally: SectionTally) -> f64 {
    if tally.total == 0 {
        return 0.0;
    }
    tally.correct as f64 / tally.total as f64
}

/// Need scores sorted highest first.
///
/// The sort is stable, so modules with equal scores keep the order in
/// which they were first missed.
pub fn rank_needs(needs: &IndexMap<ModuleId, f64>) -> Vec<(ModuleId, f64)> {
    let mut ranked: Vec<(ModuleId, f64)> = needs.iter().map(|(id, &s)| (id.clone(), s)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

/// Overall fraction correct across `answered` questions.
pub fn accuracy(correct: usize, answered: usize) -> f64 {
    if answered == 0 {
        return 0.0;
    }
    correct as f64 / answered as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_section_is_zero() {
        assert_eq!(section_percentage(SectionTally::default()), 0.0);
    }

    #[test]
    fn percentage_is_fraction_correct() {
        let tally = SectionTally {
            correct: 3,
            total: 4,
        };
        assert!((section_percentage(tally) - 0.75).abs() < 1e-12);
        let perfect = SectionTally {
            correct: 2,
            total: 2,
        };
        assert_eq!(section_percentage(perfect), 1.0);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let mut needs = IndexMap::new();
        needs.insert(ModuleId::from(7), 1.0);
        needs.insert(ModuleId::from(3), 4.0);
        needs.insert(ModuleId::from(9), 1.0);
        needs.insert(ModuleId::from(1), 4.0);

        let ids: Vec<String> = rank_needs(&needs)
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1", "7", "9"]);
    }

    #[test]
    fn ranking_empty_needs() {
        assert!(rank_needs(&IndexMap::new()).is_empty());
    }

    #[test]
    fn accuracy_handles_zero_answers() {
        assert_eq!(accuracy(0, 0), 0.0);
        assert_eq!(accuracy(1, 4), 0.25);
    }
}
