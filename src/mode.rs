//! Frequency counting on top of `ChainedHashMap`

use log::trace;

use crate::ChainedHashMap;

/// Returns the most frequent values of `items` together with their frequency.
///
/// Values are compared by their `to_string()` form. Every value reaching the highest
/// frequency is returned, in the map's table order. An empty input yields no modes and a
/// frequency of 0.
///
/// ```rust
/// use primemap::find_mode;
///
/// let (mut modes, frequency) = find_mode(["apple", "pear", "apple", "fig", "pear"]);
/// modes.sort();
/// assert_eq!(modes, vec!["apple".to_string(), "pear".to_string()]);
/// assert_eq!(frequency, 2);
/// ```
#[allow(clippy::arithmetic_side_effects)]
pub fn find_mode<I>(items: I) -> (Vec<String>, usize)
where
    I: IntoIterator,
    I::Item: ToString,
{
    let mut frequencies: ChainedHashMap<usize> = ChainedHashMap::default();

    for item in items {
        let key = item.to_string();
        let count = frequencies.get(&key).map_or(1, |count| count + 1);
        frequencies.put(key, count);
    }
    trace!(
        "counted {} distinct values in {} slots",
        frequencies.len(),
        frequencies.get_capacity()
    );

    let mut modes = Vec::new();
    let mut max_frequency = 0;
    for (key, &count) in &frequencies {
        if count > max_frequency {
            max_frequency = count;
            modes.clear();
            modes.push(key.to_string());
        } else if count == max_frequency {
            modes.push(key.to_string());
        }
    }

    (modes, max_frequency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn sorted(mut values: Vec<String>) -> Vec<String> {
        values.sort();
        values
    }

    #[test]
    fn test_distro_example() {
        let input =
            ["Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu"];
        let (modes, frequency) = find_mode(input);
        assert_eq!(sorted(modes), vec!["Mint".to_string(), "Ubuntu".to_string()]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn test_single_mode() {
        let (modes, frequency) = find_mode(["apple", "apple", "grape", "melon", "peach"]);
        assert_eq!(modes, vec!["apple".to_string()]);
        assert_eq!(frequency, 2);
    }

    #[test]
    fn test_all_distinct_values_are_modes() {
        let (modes, frequency) = find_mode(["one", "two", "three", "four", "five"]);
        assert_eq!(modes.len(), 5);
        assert_eq!(frequency, 1);
    }

    #[test]
    fn test_empty_input() {
        let (modes, frequency) = find_mode(Vec::<String>::new());
        assert!(modes.is_empty());
        assert_eq!(frequency, 0);
    }

    #[test]
    fn test_numbers_are_stringified() {
        let (modes, frequency) = find_mode([2, 4, 2, 6, 8, 4, 1, 3, 4, 5, 7, 3, 3, 2]);
        assert_eq!(sorted(modes), vec!["2".to_string(), "3".to_string(), "4".to_string()]);
        assert_eq!(frequency, 3);
    }

    #[test]
    fn test_many_values_force_growth() {
        let input: Vec<usize> = (0..100).flat_map(|i| std::iter::repeat_n(i, 1 + i % 4)).collect();
        let (modes, frequency) = find_mode(&input);
        assert_eq!(frequency, 4);
        assert_eq!(modes.len(), 25);
    }
}
