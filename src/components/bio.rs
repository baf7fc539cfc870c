//! Author bio component

use maud::{Markup, html};

use crate::avatar::AvatarImage;
use crate::metadata::SiteMetadata;

/// Renders the author bio
///
/// Places the circular avatar beside a short paragraph naming the author and
/// linking to their Twitter profile. Metadata and avatar are resolved before
/// this is called, so rendering cannot fail.
///
/// # Arguments
///
/// * `metadata`: Site metadata with author name and social handles
/// * `avatar`: Resolved fixed-size avatar image
///
/// # Returns
///
/// Bio container markup
pub fn bio(metadata: &SiteMetadata, avatar: &AvatarImage) -> Markup {
    html! {
        div class="bio" {
            img class="bio-avatar"
                src=(avatar.src)
                alt=(avatar.alt)
                width=(avatar.width)
                height=(avatar.height);
            p class="bio-text" {
                "Written by "
                strong { (metadata.author) }
                @if let Some(summary) = &metadata.summary {
                    " " (summary)
                }
                " "
                a href=(metadata.twitter_url()) {
                    "You should follow " (metadata.author) " on Twitter"
                }
            }
        }
    }
}
