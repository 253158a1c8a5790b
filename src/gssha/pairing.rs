//! Record-assembly strategies.
//!
//! Some record lists are parsed independently from sibling lists in the
//! same file and must be associated afterwards. Two contracts exist in the
//! formats handled here, and they are deliberately different:
//!
//! - the channel file pairs `LINK` and `CONNECT` records **by position**
//!   (the i-th of one list belongs to the i-th of the other);
//! - the pipe network pairs `SLINK` and `CONNECT` records **by key**
//!   (an id field carried by both sides).
//!
//! Both are named functions so each contract can be exercised on its own.

use std::collections::HashMap;

use crate::gssha::diagnostics::Diagnostics;
use crate::gssha::error::ParseError;

/// Pair two lists positionally. The lists must have equal length; a
/// mismatch means the file's structural counts disagree and there is no
/// safe association.
pub fn zip_by_position<A, B>(
    left: Vec<A>,
    right: Vec<B>,
    what: &str,
) -> Result<Vec<(A, B)>, ParseError> {
    if left.len() != right.len() {
        return Err(ParseError::malformed(format!(
            "{}: positional pairing needs equal counts, got {} and {}",
            what,
            left.len(),
            right.len()
        )));
    }
    Ok(left.into_iter().zip(right).collect())
}

/// Pair each left record with the right record sharing its key. Unmatched
/// left records pair with `None` and are reported; surplus right records
/// are reported as unreferenced.
pub fn join_by_key<'a, L, R, K, FL, FR>(
    left: &'a [L],
    right: &'a [R],
    left_key: FL,
    right_key: FR,
    what: &str,
    diag: &mut Diagnostics,
) -> Vec<(&'a L, Option<&'a R>)>
where
    K: std::hash::Hash + Eq + std::fmt::Display + Copy,
    FL: Fn(&L) -> K,
    FR: Fn(&R) -> K,
{
    let mut by_key: HashMap<K, &R> = HashMap::new();
    for r in right {
        by_key.insert(right_key(r), r);
    }

    let mut used: Vec<K> = Vec::new();
    let pairs: Vec<(&L, Option<&R>)> = left
        .iter()
        .map(|l| {
            let key = left_key(l);
            let found = by_key.get(&key).copied();
            if found.is_some() {
                used.push(key);
            } else {
                diag.warn(format!("{}: no match for key {}", what, key));
            }
            (l, found)
        })
        .collect();

    for r in right {
        let key = right_key(r);
        if !used.contains(&key) {
            diag.warn(format!("{}: key {} is never referenced", what, key));
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_by_position_pairs_in_order() {
        let pairs = zip_by_position(vec!["a", "b"], vec![1, 2], "test").unwrap();
        assert_eq!(pairs, vec![("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_zip_by_position_rejects_mismatch() {
        let err = zip_by_position(vec!["a"], vec![1, 2], "links/connects").unwrap_err();
        assert!(err.to_string().contains("1 and 2"));
    }

    #[test]
    fn test_join_by_key_matches_out_of_order() {
        let mut diag = Diagnostics::new();
        let left = vec![(1, "one"), (2, "two")];
        let right = vec![(2, "TWO"), (1, "ONE")];

        let pairs = join_by_key(&left, &right, |l| l.0, |r| r.0, "test", &mut diag);
        assert_eq!(pairs[0].1.unwrap().1, "ONE");
        assert_eq!(pairs[1].1.unwrap().1, "TWO");
        assert!(diag.is_empty());
    }

    #[test]
    fn test_join_by_key_reports_unmatched() {
        let mut diag = Diagnostics::new();
        let left = vec![(1, ())];
        let right: Vec<(i64, ())> = vec![(7, ())];

        let pairs = join_by_key(&left, &right, |l| l.0 as i64, |r| r.0, "slinks", &mut diag);
        assert!(pairs[0].1.is_none());
        assert_eq!(diag.len(), 2); // no match for 1, 7 never referenced
    }
}
