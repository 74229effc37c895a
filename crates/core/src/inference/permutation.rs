//! Ordered-answer expansion.
//!
//! "Answer in order" questions list options and expect several of them
//! concatenated. Every ordering of `group_size` options is a candidate.

/// Phrases that mark a question as asking for an ordering.
pub const ORDER_KEYWORDS: &[&str] = &[
    "排列", "排序", "依序", "順序", "遞增", "遞減", "升冪", "降冪", "新到舊", "舊到新", "小到大",
    "大到小", "高到低", "低到高",
];

pub fn has_order_keyword(text: &str) -> bool {
    ORDER_KEYWORDS.iter().any(|keyword| text.contains(keyword))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Lazy `r`-permutations of a slice, in index-cycling order.
///
/// For `[A, B, C]` taken two at a time this yields AB, AC, BA, BC, CA, CB.
/// Nothing is yielded when `r` exceeds the pool size.
#[derive(Debug, Clone)]
pub struct Permutations<'a, T> {
    pool: &'a [T],
    r: usize,
    indices: Vec<usize>,
    cycles: Vec<usize>,
    state: State,
}

impl<'a, T> Permutations<'a, T> {
    pub fn new(pool: &'a [T], r: usize) -> Self {
        let n = pool.len();
        let cycles = if r <= n { (n - r + 1..=n).rev().collect() } else { Vec::new() };
        Self {
            pool,
            r,
            indices: (0..n).collect(),
            cycles,
            state: State::Fresh,
        }
    }

    fn current(&self) -> Vec<&'a T> {
        self.indices[..self.r].iter().map(|&i| &self.pool[i]).collect()
    }
}

impl<'a, T> Iterator for Permutations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::Fresh => {
                if self.r > self.pool.len() {
                    self.state = State::Done;
                    return None;
                }
                self.state = State::Running;
                Some(self.current())
            }
            State::Running => {
                let n = self.pool.len();
                for i in (0..self.r).rev() {
                    self.cycles[i] -= 1;
                    if self.cycles[i] == 0 {
                        self.indices[i..].rotate_left(1);
                        self.cycles[i] = n - i;
                    } else {
                        let j = self.cycles[i];
                        self.indices.swap(i, n - j);
                        return Some(self.current());
                    }
                }
                self.state = State::Done;
                None
            }
        }
    }
}

/// Concatenated orderings of `group_size` options, lazily.
pub fn order_candidates(options: &[String], group_size: usize) -> impl Iterator<Item = String> + '_ {
    let r = if group_size == 0 { options.len() + 1 } else { group_size };
    Permutations::new(options, r).map(|group| group.into_iter().map(String::as_str).collect())
}

/// All concatenated orderings of `group_size` options. Empty for a zero group.
pub fn expand_order_candidates(options: &[String], group_size: usize) -> Vec<String> {
    order_candidates(options, group_size).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pairs_in_cycling_order() {
        let options = strings(&["A", "B", "C"]);
        assert_eq!(
            expand_order_candidates(&options, 2),
            strings(&["AB", "AC", "BA", "BC", "CA", "CB"])
        );
    }

    #[test]
    fn test_full_permutations() {
        let options = strings(&["1", "2", "3"]);
        assert_eq!(
            expand_order_candidates(&options, 3),
            strings(&["123", "132", "213", "231", "312", "321"])
        );
    }

    #[test]
    fn test_group_larger_than_pool() {
        let options = strings(&["A", "B"]);
        assert!(expand_order_candidates(&options, 3).is_empty());
    }

    #[test]
    fn test_zero_group_is_empty() {
        let options = strings(&["A", "B"]);
        assert!(expand_order_candidates(&options, 0).is_empty());
    }

    #[test]
    fn test_count_is_falling_factorial() {
        let pool: Vec<u8> = (0..5).collect();
        assert_eq!(Permutations::new(&pool, 3).count(), 60);
        assert_eq!(Permutations::new(&pool, 5).count(), 120);
        assert_eq!(Permutations::new(&pool, 1).count(), 5);
    }

    #[test]
    fn test_lazy_take() {
        let options = strings(&["A", "B", "C", "D", "E", "F", "G", "H"]);
        let first: Vec<String> = order_candidates(&options, 4).take(3).collect();
        assert_eq!(first, strings(&["ABCD", "ABCE", "ABCF"]));
    }

    #[test]
    fn test_order_keywords() {
        assert!(has_order_keyword("請依序輸入"));
        assert!(has_order_keyword("由小到大排列"));
        assert!(!has_order_keyword("請輸入驗證碼"));
    }
}
