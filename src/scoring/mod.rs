//! every place that turns raw vote rows into a score goes through this
//! module, so there is exactly one answer to "what is this tag's score"

use std::collections::HashMap;

use crate::model::repository::VoteRecord;

/// sums vote values per tag across the passed rows. Books are not
/// distinguished, so passing rows for several books gives the tag's combined
/// score over all of them (the author-page case)
pub fn score_by_tag(votes: &[VoteRecord]) -> HashMap<u32, i64> {
    let mut scores: HashMap<u32, i64> = HashMap::new();
    for vote in votes {
        *scores.entry(vote.tag_id).or_insert(0) += vote.value;
    }
    scores
}

/// sums vote values per book across the passed rows, for when the scope is a
/// single tag
pub fn score_by_book(votes: &[VoteRecord]) -> HashMap<u32, i64> {
    let mut scores: HashMap<u32, i64> = HashMap::new();
    for vote in votes {
        *scores.entry(vote.book_id).or_insert(0) += vote.value;
    }
    scores
}

/// nests scores as book -> tag -> net score, the shape the explore filter and
/// the shelf book list work on
pub fn scores_by_book_and_tag(votes: &[VoteRecord]) -> HashMap<u32, HashMap<u32, i64>> {
    let mut scores: HashMap<u32, HashMap<u32, i64>> = HashMap::new();
    for vote in votes {
        *scores
            .entry(vote.book_id)
            .or_default()
            .entry(vote.tag_id)
            .or_insert(0) += vote.value;
    }
    scores
}

/// the signed value one user contributed to the passed rows, 0 if they have
/// no row there. A stored 0 and a missing row read the same
pub fn user_value(votes: &[VoteRecord], user_id: u32) -> i64 {
    votes
        .iter()
        .filter(|v| v.user_id == user_id)
        .map(|v| v.value)
        .sum()
}

/// a key only counts as tagged when the votes for it land net positive;
/// an exact zero is not tagged no matter how many upvotes went into it
pub fn is_tagged(score: i64) -> bool {
    score > 0
}

/// the include/exclude filter: a book passes when every include tag is net
/// positive on it and no exclude tag is. Overlapping sets are the caller's
/// mistake and mean the book can never pass
pub fn passes_filter(scores: &HashMap<u32, i64>, include: &[u32], exclude: &[u32]) -> bool {
    let has = |tag_id: &u32| is_tagged(*scores.get(tag_id).unwrap_or(&0));
    include.iter().all(has) && !exclude.iter().any(has)
}

/// ranking score for `best_match`: the sum of the book's net scores over just
/// the include tags. Missing tags contribute 0
pub fn match_score(scores: &HashMap<u32, i64>, include: &[u32]) -> i64 {
    include
        .iter()
        .map(|tag_id| scores.get(tag_id).unwrap_or(&0))
        .sum()
}

/// ranking score for `popularity`: net-negative tags are clamped to zero
/// instead of penalizing the book
pub fn popularity(scores: &HashMap<u32, i64>) -> i64 {
    scores.values().map(|score| (*score).max(0)).sum()
}

/// orders a score map into a ranked list: score descending, then id ascending
/// so equal scores always come back in the same order
pub fn rank(scores: HashMap<u32, i64>) -> Vec<(u32, i64)> {
    let mut ranked: Vec<(u32, i64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(book_id: u32, tag_id: u32, user_id: u32, value: i64) -> VoteRecord {
        VoteRecord {
            book_id,
            tag_id,
            user_id,
            value,
        }
    }

    #[test]
    fn score_by_tag_sums_values() {
        let votes = vec![
            vote(1, 10, 1, 1),
            vote(1, 10, 2, 1),
            vote(1, 10, 3, -1),
            vote(1, 11, 1, -1),
        ];
        let scores = score_by_tag(&votes);
        assert_eq!(Some(&1), scores.get(&10));
        assert_eq!(Some(&-1), scores.get(&11));
    }

    #[test]
    fn score_by_tag_is_order_invariant() {
        let mut votes = vec![
            vote(1, 10, 1, 1),
            vote(1, 10, 2, -1),
            vote(1, 10, 3, 1),
            vote(2, 10, 4, 1),
        ];
        let forward = score_by_tag(&votes);
        votes.reverse();
        assert_eq!(forward, score_by_tag(&votes));
    }

    #[test]
    fn empty_votes_give_empty_scores() {
        assert!(score_by_tag(&[]).is_empty());
        assert!(score_by_book(&[]).is_empty());
        assert!(scores_by_book_and_tag(&[]).is_empty());
    }

    #[test]
    fn user_value_is_zero_when_absent() {
        let votes = vec![vote(1, 10, 1, 1), vote(1, 10, 2, -1)];
        assert_eq!(1, user_value(&votes, 1));
        assert_eq!(-1, user_value(&votes, 2));
        assert_eq!(0, user_value(&votes, 3));
    }

    #[test]
    fn zero_or_negative_score_is_not_tagged() {
        // one up and one down cancel out, even though someone voted positively
        let votes = vec![vote(1, 10, 1, 1), vote(1, 10, 2, -1)];
        let scores = score_by_tag(&votes);
        assert!(!is_tagged(*scores.get(&10).unwrap()));
        assert!(!is_tagged(-3));
        assert!(is_tagged(1));
    }

    #[test]
    fn filter_requires_all_includes_and_no_excludes() {
        // book with T1: 2, T2: -1
        let scores = HashMap::from([(1, 2), (2, -1)]);
        assert!(passes_filter(&scores, &[1], &[2]));
        assert!(!passes_filter(&scores, &[2], &[]));
        assert!(!passes_filter(&scores, &[], &[1]));
        // empty sets impose no constraint
        assert!(passes_filter(&scores, &[], &[]));
    }

    #[test]
    fn filter_with_overlapping_sets_never_passes() {
        let scores = HashMap::from([(1, 5)]);
        assert!(!passes_filter(&scores, &[1], &[1]));
    }

    #[test]
    fn match_score_only_counts_include_tags() {
        let scores = HashMap::from([(1, 3), (2, 2), (3, 100)]);
        assert_eq!(5, match_score(&scores, &[1, 2]));
        // a tag the book doesn't have contributes nothing
        assert_eq!(3, match_score(&scores, &[1, 4]));
    }

    #[test]
    fn popularity_clamps_negative_tags_to_zero() {
        let scores = HashMap::from([(1, 3), (2, -5)]);
        assert_eq!(3, popularity(&scores));
        let other = HashMap::from([(1, 2)]);
        assert!(popularity(&scores) > popularity(&other));
    }

    #[test]
    fn rank_sorts_by_score_then_id() {
        let scores = HashMap::from([(4, 2), (1, 5), (3, 2), (2, 7)]);
        let ranked = rank(scores);
        assert_eq!(vec![(2, 7), (1, 5), (3, 2), (4, 2)], ranked);
    }
}
