use testsim_types::Signature;

/// Jaccard index `|a ∩ b| / |a ∪ b|` of two signatures.
///
/// Two empty signatures score `0.0`: tests that touch no tracked code are
/// never similar to each other.
#[must_use]
pub fn jaccard(a: &Signature, b: &Signature) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|m| large.contains(*m)).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(items: &[&str]) -> Signature {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_is_one() {
        let a = sig(&["m1", "m2", "m3"]);
        assert_eq!(jaccard(&a, &a.clone()), 1.0);
    }

    #[test]
    fn disjoint_is_zero() {
        assert_eq!(jaccard(&sig(&["a"]), &sig(&["b"])), 0.0);
    }

    #[test]
    fn both_empty_is_zero() {
        assert_eq!(jaccard(&sig(&[]), &sig(&[])), 0.0);
    }

    #[test]
    fn one_empty_is_zero() {
        assert_eq!(jaccard(&sig(&[]), &sig(&["a"])), 0.0);
    }

    #[test]
    fn partial_overlap() {
        // {m1..m4} vs {m1,m2,m3}: 3 shared of 4
        let a = sig(&["m1", "m2", "m3", "m4"]);
        let b = sig(&["m1", "m2", "m3"]);
        assert_eq!(jaccard(&a, &b), 0.75);
        assert_eq!(jaccard(&b, &a), 0.75);
    }

    #[test]
    fn one_shared_out_of_nine() {
        let a = sig(&["m1", "m2", "m3", "m4", "m5"]);
        let b = sig(&["m1", "x", "y", "z", "w"]);
        assert!((jaccard(&a, &b) - 1.0 / 9.0).abs() < 1e-12);
    }
}
