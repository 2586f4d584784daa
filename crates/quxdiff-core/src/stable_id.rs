//! Deterministic content-derived issue identity.
//!
//! Ids are assigned once, when the synthesis step first creates an issue, and
//! let later comparisons recognise the same issue without relying on
//! per-run ordinals.

use sha2::{Digest, Sha256};

use crate::domain::{IssueType, Synthesis};

/// Namespace tag carried by every stable id.
pub const STABLE_ID_PREFIX: &str = "QUX-";

/// Number of hex digest characters kept after the prefix.
const STABLE_ID_HEX_LEN: usize = 8;

/// Compute the stable id for an issue title and its discriminator.
///
/// Both inputs are trimmed and lowercased before hashing, so the result is
/// insensitive to case and surrounding whitespace.
pub fn generate_stable_id(title: &str, discriminator: &str) -> String {
    let key = format!(
        "{}:{}",
        title.trim().to_lowercase(),
        discriminator.trim().to_lowercase()
    );
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}{}", STABLE_ID_PREFIX, &digest[..STABLE_ID_HEX_LEN])
}

/// Whether `id` carries the stable-id marker. Legacy ordinal ids do not.
pub fn is_stable_id(id: &str) -> bool {
    id.starts_with(STABLE_ID_PREFIX)
}

/// Assign stable ids to every issue in `synthesis` whose id lacks the marker.
///
/// Issues that already carry a stable id keep it. Returns the number of ids
/// assigned.
pub fn stamp_stable_ids(synthesis: &mut Synthesis) -> usize {
    let lists = [
        (IssueType::Consensus, &mut synthesis.consensus_issues),
        (IssueType::VideoOnly, &mut synthesis.video_only_issues),
        (IssueType::ModelUnique, &mut synthesis.model_unique_issues),
    ];

    let mut stamped = 0usize;
    for (listed_as, issues) in lists {
        for issue in issues.iter_mut() {
            if is_stable_id(&issue.id) {
                continue;
            }
            let id = generate_stable_id(&issue.title, issue.discriminator(listed_as));
            tracing::trace!(old_id = %issue.id, new_id = %id, "stable id assigned");
            issue.id = id;
            stamped += 1;
        }
    }
    stamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Issue, Severity};

    #[test]
    fn test_stable_id_shape() {
        let id = generate_stable_id("Login broken", "auth");
        assert!(id.starts_with("QUX-"));
        assert_eq!(id.len(), STABLE_ID_PREFIX.len() + 8);
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_stable_id_is_case_and_whitespace_insensitive() {
        let a = generate_stable_id("Slow loading", "performance");
        let b = generate_stable_id("  SLOW Loading ", "Performance\n");
        assert_eq!(a, b);
    }

    #[test]
    fn test_stable_id_discriminator_sensitive() {
        assert_ne!(
            generate_stable_id("Slow loading", "performance"),
            generate_stable_id("Slow loading", "video")
        );
    }

    #[test]
    fn test_stable_id_golden_value() {
        // sha256("login broken:auth")
        let mut hasher = Sha256::new();
        hasher.update(b"login broken:auth");
        let expected = format!("QUX-{}", &hex::encode(hasher.finalize())[..8]);
        assert_eq!(generate_stable_id("Login Broken", "AUTH"), expected);
    }

    #[test]
    fn test_is_stable_id() {
        assert!(is_stable_id("QUX-aaaa"));
        assert!(is_stable_id("QUX-0badf00d"));
        assert!(!is_stable_id("C1"));
        assert!(!is_stable_id("qux-0badf00d"));
    }

    #[test]
    fn test_stamp_preserves_existing_ids() {
        let mut synthesis = Synthesis::new(80.0, "ready")
            .with_consensus(Issue::new("QUX-12345678", "Login broken", Severity::P0))
            .with_consensus(
                Issue::new("C2", "Cart empties", Severity::P1).with_category("checkout"),
            )
            .with_video_only(Issue::new("V1", "Spinner flickers", Severity::P2));

        let stamped = stamp_stable_ids(&mut synthesis);

        assert_eq!(stamped, 2);
        assert_eq!(synthesis.consensus_issues[0].id, "QUX-12345678");
        assert_eq!(
            synthesis.consensus_issues[1].id,
            generate_stable_id("Cart empties", "checkout")
        );
        assert_eq!(
            synthesis.video_only_issues[0].id,
            generate_stable_id("Spinner flickers", "video")
        );
    }
}
