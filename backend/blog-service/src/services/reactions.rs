/// Reaction totals computed in memory from the full reaction set
use crate::domain::models::{PostDetails, PostWithReactions, Reaction};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactionCounts {
    pub likes: i64,
    pub favorites: i64,
}

/// Count liked and favorited reactions per post id
pub fn count_by_post(reactions: &[Reaction]) -> HashMap<Uuid, ReactionCounts> {
    let mut counts: HashMap<Uuid, ReactionCounts> = HashMap::new();

    for reaction in reactions {
        if !reaction.liked && !reaction.favorite {
            continue;
        }
        let entry = counts.entry(reaction.post_id).or_default();
        if reaction.liked {
            entry.likes += 1;
        }
        if reaction.favorite {
            entry.favorites += 1;
        }
    }

    counts
}

/// Annotate each post with its totals; posts without reactions get zeroes
pub fn attach_counts(posts: Vec<PostDetails>, reactions: &[Reaction]) -> Vec<PostWithReactions> {
    let counts = count_by_post(reactions);

    posts
        .into_iter()
        .map(|details| {
            let c = counts.get(&details.post.id).copied().unwrap_or_default();
            PostWithReactions {
                details,
                likes: c.likes,
                favorites: c.favorites,
            }
        })
        .collect()
}
