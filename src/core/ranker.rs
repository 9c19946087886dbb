use crate::domain::model::DomainNode;
use std::cmp::Ordering;

/// Pairwise order used for ranking: `left` is scored from `right`'s location
/// and `right` from `left`'s, higher score first.
pub fn compare_by_score(left: &DomainNode, right: &DomainNode) -> Ordering {
    let left_score = left.score(&right.location);
    let right_score = right.score(&left.location);
    right_score.total_cmp(&left_score)
}

/// Sorts nodes by descending score. Stable: equal scores keep input order.
pub fn rank_nodes(mut nodes: Vec<DomainNode>) -> Vec<DomainNode> {
    nodes.sort_by(compare_by_score);
    nodes
}
