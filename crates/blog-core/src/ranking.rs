//! Count-based post rankings: similar posts and most commented.

use std::cmp::Reverse;

use crate::domain::Post;

/// Number of similar posts shown on a detail page.
pub const SIMILAR_POSTS_LIMIT: usize = 4;

/// Rank posts by a count descending, ties broken by publish date descending.
pub fn rank_by_count(mut scored: Vec<(Post, u64)>, limit: usize) -> Vec<(Post, u64)> {
    scored.sort_by_key(|(post, count)| (Reverse(*count), Reverse(post.publish)));
    scored.truncate(limit);
    scored
}

/// Rank candidates sharing tags with `current`.
///
/// Candidates sharing no tag, and `current` itself, are dropped.
pub fn rank_similar(current: &Post, candidates: Vec<(Post, u64)>, limit: usize) -> Vec<Post> {
    let candidates = candidates
        .into_iter()
        .filter(|(post, shared)| post.id != current.id && *shared > 0)
        .collect();

    rank_by_count(candidates, limit)
        .into_iter()
        .map(|(post, _)| post)
        .collect()
}
