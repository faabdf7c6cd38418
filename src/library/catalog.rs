//! Searching and tag filtering over a list of proofs.

use std::collections::BTreeSet;

use super::Proof;

/// Case-insensitive match of `query` against every text field and tag.
/// A blank query matches everything.
pub fn matches_query(proof: &Proof, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    [&proof.title, &proof.summary, &proof.author, &proof.content]
        .into_iter()
        .chain(&proof.tags)
        .any(|field| field.to_lowercase().contains(&q))
}

/// Proofs matching `query` and, when given, carrying exactly `tag`.
pub fn filter<'a>(proofs: &'a [Proof], query: &str, tag: Option<&str>) -> Vec<&'a Proof> {
    proofs
        .iter()
        .filter(|p| matches_query(p, query))
        .filter(|p| tag.map_or(true, |t| p.tags.iter().any(|pt| pt == t)))
        .collect()
}

/// Every tag in use, sorted and deduplicated.
pub fn all_tags(proofs: &[Proof]) -> Vec<String> {
    proofs
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Split comma-separated tag input. Entries are trimmed and blanks dropped;
/// order and duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// "Showing 1 of 2 proofs in Analysis"
pub fn summary(shown: usize, total: usize, tag: Option<&str>) -> String {
    let plural = if total == 1 { "" } else { "s" };
    let mut line = format!("Showing {shown} of {total} proof{plural}");
    if let Some(tag) = tag {
        line.push_str(" in ");
        line.push_str(tag);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::seed::initial_proofs;

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let proofs = initial_proofs(0);
        let ids = |q: &str| -> Vec<String> {
            filter(&proofs, q, None).iter().map(|p| p.id.clone()).collect()
        };

        assert_eq!(ids("EUCLID"), vec!["1"]);
        assert_eq!(ids("  complex numbers "), vec!["2"]);
        assert_eq!(ids("fundamental"), vec!["1", "2"]);
        assert_eq!(ids("blacksquare"), vec!["1", "2"]);
        assert_eq!(ids(""), vec!["1", "2"]);
        assert!(ids("topology").is_empty());
    }

    #[test]
    fn test_tag_filter_is_exact() {
        let proofs = initial_proofs(0);
        assert_eq!(filter(&proofs, "", Some("Analysis")).len(), 1);
        assert!(filter(&proofs, "", Some("analysis")).is_empty());
        assert!(filter(&proofs, "euclid", Some("Analysis")).is_empty());
    }

    #[test]
    fn test_all_tags_sorted_unique() {
        let mut proofs = initial_proofs(0);
        proofs[1].tags.push("Classics".into());
        assert_eq!(
            all_tags(&proofs),
            vec!["Analysis", "Classics", "Complex Numbers", "Number Theory"]
        );
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" Algebra, ,Groups,Algebra ,"), vec!["Algebra", "Groups", "Algebra"]);
        assert!(parse_tags("  ").is_empty());
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary(1, 2, Some("Analysis")), "Showing 1 of 2 proofs in Analysis");
        assert_eq!(summary(0, 1, None), "Showing 0 of 1 proof");
    }
}
