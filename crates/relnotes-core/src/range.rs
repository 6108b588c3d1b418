//! Tag range resolution.
//!
//! Either end of the range may be left empty. The to-tag then comes from the
//! reference that triggered the run, and the from-tag is the tag listed right
//! after it by the forge. The forge lists tags newest first and that order is
//! trusted as-is: tags are never re-sorted by version here.

use relnotes_forge::{RepoSlug, RepositoryQuery, TagRange};
use tracing::{debug, info};

use crate::{CoreResult, RangeError};

/// Prefix of fully qualified tag references.
pub const TAG_REF_PREFIX: &str = "refs/tags/";

/// Number of tags consulted when looking for a predecessor.
///
/// Only this first page is searched, so a to-tag older than the 100 newest
/// tags is reported as not found. A to-tag that is the last entry of a full
/// page is reported as having no previous tag, even when older tags exist.
pub const TAG_PAGE_SIZE: u8 = 100;

/// Extracts the tag name from a `refs/tags/...` reference.
///
/// # Errors
///
/// Returns [`RangeError::AmbiguousToTag`] if `reference` is not a tag reference.
pub fn tag_from_ref(reference: &str) -> Result<String, RangeError> {
    reference
        .strip_prefix(TAG_REF_PREFIX)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .ok_or_else(|| RangeError::AmbiguousToTag(reference.to_string()))
}

/// Returns the tag listed immediately after `to` in `tags`.
///
/// # Errors
///
/// Returns [`RangeError::TagNotFound`] if `to` is not listed, and
/// [`RangeError::NoPreviousTag`] if it is the last entry.
pub fn previous_tag(tags: &[String], to: &str) -> Result<String, RangeError> {
    let idx = tags
        .iter()
        .position(|tag| tag == to)
        .ok_or_else(|| RangeError::TagNotFound(to.to_string()))?;

    tags.get(idx + 1)
        .cloned()
        .ok_or_else(|| RangeError::NoPreviousTag(to.to_string()))
}

/// Resolves a possibly incomplete tag pair into a concrete range.
///
/// Empty (or blank) inputs count as missing. The tag list is only queried
/// when the from-tag has to be derived.
///
/// # Errors
///
/// Returns [`crate::CoreError::Range`] if the range cannot be determined and
/// [`crate::CoreError::Fetch`] if the tag list query fails.
pub async fn resolve_range<Q>(
    query: &Q,
    repo: &RepoSlug,
    input_from: &str,
    input_to: &str,
    current_ref: &str,
) -> CoreResult<TagRange>
where
    Q: RepositoryQuery + ?Sized,
{
    let to = match input_to.trim() {
        "" => {
            let tag = tag_from_ref(current_ref.trim())?;
            debug!(%tag, reference = current_ref, "derived to-tag from current ref");
            tag
        }
        given => given.to_string(),
    };

    let from = match input_from.trim() {
        "" => {
            let tags = query.list_tags(repo, TAG_PAGE_SIZE).await?;
            let tag = previous_tag(&tags, &to)?;
            debug!(%tag, listed = tags.len(), "derived from-tag from tag list");
            tag
        }
        given => given.to_string(),
    };

    info!(%from, %to, "resolved tag range");
    Ok(TagRange::new(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use crate::testing::FakeRepository;

    fn repo() -> RepoSlug {
        RepoSlug::new("octo", "widgets")
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_tag_from_ref() {
        assert_eq!(tag_from_ref("refs/tags/v1.2.0").unwrap(), "v1.2.0");
    }

    #[test]
    fn test_tag_from_ref_keeps_slashes() {
        assert_eq!(
            tag_from_ref("refs/tags/release/2024.1").unwrap(),
            "release/2024.1"
        );
    }

    #[test]
    fn test_tag_from_ref_rejects_branch() {
        assert_eq!(
            tag_from_ref("refs/heads/main"),
            Err(RangeError::AmbiguousToTag("refs/heads/main".to_string()))
        );
    }

    #[test]
    fn test_tag_from_ref_rejects_bare_prefix() {
        assert!(tag_from_ref("refs/tags/").is_err());
        assert!(tag_from_ref("").is_err());
    }

    #[test]
    fn test_previous_tag() {
        let list = tags(&["v1.2.0", "v1.1.0", "v1.0.0"]);
        assert_eq!(previous_tag(&list, "v1.2.0").unwrap(), "v1.1.0");
        assert_eq!(previous_tag(&list, "v1.1.0").unwrap(), "v1.0.0");
    }

    #[test]
    fn test_previous_tag_uses_listed_order() {
        // Deliberately not version-sorted: the listed order wins.
        let list = tags(&["v2.0.0", "v0.1.0", "v1.0.0"]);
        assert_eq!(previous_tag(&list, "v2.0.0").unwrap(), "v0.1.0");
    }

    #[test]
    fn test_previous_tag_not_found() {
        let list = tags(&["v1.1.0", "v1.0.0"]);
        assert_eq!(
            previous_tag(&list, "v9.9.9"),
            Err(RangeError::TagNotFound("v9.9.9".to_string()))
        );
    }

    #[test]
    fn test_previous_tag_oldest() {
        let list = tags(&["v1.1.0", "v1.0.0"]);
        assert_eq!(
            previous_tag(&list, "v1.0.0"),
            Err(RangeError::NoPreviousTag("v1.0.0".to_string()))
        );
    }

    #[test]
    fn test_previous_tag_empty_list() {
        assert!(matches!(
            previous_tag(&[], "v1.0.0"),
            Err(RangeError::TagNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_both_given_skips_tag_query() {
        let fake = FakeRepository::default();
        let range = resolve_range(&fake, &repo(), "v1.0.0", "v1.1.0", "")
            .await
            .unwrap();

        assert_eq!(range, TagRange::new("v1.0.0", "v1.1.0"));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_to_from_ref() {
        let fake = FakeRepository::default();
        let range = resolve_range(&fake, &repo(), "v1.0.0", "", "refs/tags/v1.1.0")
            .await
            .unwrap();

        assert_eq!(range.to, "v1.1.0");
    }

    #[tokio::test]
    async fn test_resolve_to_from_branch_ref_fails() {
        let fake = FakeRepository::with_tags(&["v1.1.0", "v1.0.0"]);
        let err = resolve_range(&fake, &repo(), "", "", "refs/heads/main")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Range(RangeError::AmbiguousToTag(ref r)) if r == "refs/heads/main"
        ));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_from_previous_tag() {
        let fake = FakeRepository::with_tags(&["v1.2.0", "v1.1.0", "v1.0.0"]);
        let range = resolve_range(&fake, &repo(), "", "v1.1.0", "")
            .await
            .unwrap();

        assert_eq!(range, TagRange::new("v1.0.0", "v1.1.0"));
        assert_eq!(fake.calls(), vec!["list_tags"]);
    }

    #[tokio::test]
    async fn test_resolve_both_derived() {
        let fake = FakeRepository::with_tags(&["v1.1.0", "v1.0.0"]);
        let range = resolve_range(&fake, &repo(), " ", "", "refs/tags/v1.1.0")
            .await
            .unwrap();

        assert_eq!(range, TagRange::new("v1.0.0", "v1.1.0"));
    }

    #[tokio::test]
    async fn test_resolve_first_tag_fails() {
        let fake = FakeRepository::with_tags(&["v0.1.0"]);
        let err = resolve_range(&fake, &repo(), "", "v0.1.0", "")
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Range(RangeError::NoPreviousTag(_))));
    }

    #[tokio::test]
    async fn test_resolve_only_first_page_is_searched() {
        let names: Vec<String> = (0..150).rev().map(|i| format!("v0.{i}.0")).collect();
        let fake = FakeRepository {
            tags: names,
            ..FakeRepository::default()
        };

        // v0.10.0 sits at index 139, beyond the first page.
        let err = resolve_range(&fake, &repo(), "", "v0.10.0", "")
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Range(RangeError::TagNotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_last_entry_of_full_page_has_no_previous() {
        let names: Vec<String> = (0..150).rev().map(|i| format!("v0.{i}.0")).collect();
        let fake = FakeRepository {
            tags: names,
            ..FakeRepository::default()
        };

        // v0.50.0 is the 100th entry; v0.49.0 only appears on the next page.
        let err = resolve_range(&fake, &repo(), "", "v0.50.0", "")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Range(RangeError::NoPreviousTag(ref t)) if t == "v0.50.0"
        ));
    }

    #[tokio::test]
    async fn test_resolve_tag_query_failure_is_fetch_error() {
        let fake = FakeRepository {
            fail_tags: true,
            ..FakeRepository::default()
        };
        let err = resolve_range(&fake, &repo(), "", "v1.0.0", "")
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Fetch(_)));
    }
}
