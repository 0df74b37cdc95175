/// Length, in characters, of the longest common suffix of `a` and `b`.
///
/// Used to rank artifact candidates against a requested source path:
/// `out/contracts/Order.sol` shares more of `contracts/Order.sol` than
/// `out/test/Order.sol` does.
pub fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_scores_full_length() {
        let s = "contracts/Order.sol";
        assert_eq!(common_suffix_len(s, s), s.chars().count());
        assert_eq!(common_suffix_len("", ""), 0);
    }

    #[test]
    fn stops_at_first_divergence() {
        assert_eq!(common_suffix_len("contracts/Order.sol", "out/test/Order.sol"), 10);
        assert_eq!(common_suffix_len("contracts/Order.sol", "out/contracts/Order.sol"), 19);
        assert_eq!(common_suffix_len("a.sol", "b.txt"), 0);
    }

    #[test]
    fn symmetric() {
        let pairs = [
            ("contracts/Order.sol", "out/Order.sol"),
            ("x", "xyz/x"),
            ("", "abc"),
            ("src/Ünïcode.sol", "lib/Ünïcode.sol"),
        ];
        for (a, b) in pairs {
            assert_eq!(common_suffix_len(a, b), common_suffix_len(b, a));
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(common_suffix_len("aé", "bé"), 1);
    }
}
