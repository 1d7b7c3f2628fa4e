//! Prime table sizing shared by both map variants.

/// Returns true if `n` is prime.
///
/// Trial division by odd factors up to the square root of `n`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub const fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor = 3;
    // `factor <= n / factor` is `factor * factor <= n` without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// The largest prime that fits in a `usize`
#[cfg(target_pointer_width = "64")]
pub const LARGEST_PRIME: usize = 18_446_744_073_709_551_557; // 2^64 - 59

/// The largest prime that fits in a `usize`
#[cfg(target_pointer_width = "32")]
pub const LARGEST_PRIME: usize = 4_294_967_291; // 2^32 - 5

/// Returns the smallest prime greater than or equal to `n`.
///
/// Candidates are stepped by 2 starting from the first odd value at or above `n`,
/// except that 2 is returned as-is. As a consequence 0 and 1 both map to 3. Inputs
/// above `LARGEST_PRIME` have no prime to round up to and saturate at it.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub const fn next_prime(n: usize) -> usize {
    if n == 2 {
        return 2;
    }
    if n >= LARGEST_PRIME {
        return LARGEST_PRIME;
    }

    // n < LARGEST_PRIME, so no candidate can step past it
    let mut candidate = if n % 2 == 0 { n + 1 } else { n };
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_next_prime_keeps_two() {
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(3), 3);
        assert_eq!(next_prime(4), 5);
    }

    #[test]
    fn test_next_prime_of_zero_and_one() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
    }

    #[test]
    fn test_next_prime_from_composites() {
        assert_eq!(next_prime(20), 23);
        assert_eq!(next_prime(22), 23);
        assert_eq!(next_prime(24), 29);
        assert_eq!(next_prime(75), 79);
        assert_eq!(next_prime(106), 107);
        assert_eq!(next_prime(1000), 1009);
    }

    #[test]
    fn test_next_prime_saturates_at_largest_prime() {
        assert_eq!(next_prime(usize::MAX), LARGEST_PRIME);
        assert_eq!(next_prime(usize::MAX - 2), LARGEST_PRIME);
        assert_eq!(next_prime(LARGEST_PRIME), LARGEST_PRIME);
    }

    #[test]
    fn test_squares_of_primes_are_not_prime() {
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(10_201)); // 101 * 101
    }

    proptest! {
        #[test]
        fn next_prime_is_smallest_prime_at_or_above(n in 2usize..20_000) {
            let p = next_prime(n);
            prop_assert!(p >= n);
            prop_assert!(is_prime(p));
            prop_assert!((n..p).all(|m| !is_prime(m)));
        }
    }
}
