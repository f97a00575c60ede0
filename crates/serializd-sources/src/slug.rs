/// Characters that become a hyphen in a guessed slug.
const SEPARATORS: [char; 4] = [' ', '\'', '&', ':'];

/// Guess a URL slug from a show's display name.
///
/// `"Grey's Anatomy"` -> `"grey-s-anatomy"`, `"Law & Order: SVU"` -> `"law-order-svu"`.
/// Not URL-escaped; escape when building the request path.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.to_lowercase().chars() {
        let ch = if SEPARATORS.contains(&ch) { '-' } else { ch };
        if ch == '-' && (slug.is_empty() || slug.ends_with('-')) {
            continue;
        }
        slug.push(ch);
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Slug escaped for use as a single path segment.
pub fn path_segment(slug: &str) -> String {
    urlencoding::encode(slug).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_become_single_hyphen() {
        assert_eq!(slugify("Grey's Anatomy"), "grey-s-anatomy");
        assert_eq!(slugify("Law & Order: Special Victims Unit"), "law-order-special-victims-unit");
        assert_eq!(slugify("a:b&c'd e"), "a-b-c-d-e");
    }

    #[test]
    fn test_runs_collapse() {
        assert_eq!(slugify("Star Trek:  Picard"), "star-trek-picard");
        assert_eq!(slugify("A -- B"), "a-b");
    }

    #[test]
    fn test_edges_trimmed() {
        assert_eq!(slugify(" Severance: "), "severance");
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        for name in ["The Office", "Bob's Burgers", "Mr. Robot", "It's Always Sunny: Philadelphia"] {
            let once = slugify(name);
            assert_eq!(once, slugify(name));
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn test_other_punctuation_is_kept_but_escaped_in_paths() {
        let slug = slugify("Mr. Robot?");
        assert_eq!(slug, "mr.-robot?");
        assert_eq!(path_segment(&slug), "mr.-robot%3F");
    }
}
