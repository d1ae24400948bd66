//! Head-to-head win probabilities between dice.

use super::dice::{Die, DieSet, FACES};

/// Probability that a throw of `a` is strictly higher than a throw of `b`
pub fn win_probability(a: &Die, b: &Die) -> f64 {
    let wins = a
        .faces()
        .iter()
        .flat_map(|x| b.faces().iter().filter(move |y| x > *y))
        .count();
    wins as f64 / (FACES * FACES) as f64
}

/// Win probability of every die (rows) against every die (columns)
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityMatrix {
    dice: Vec<Die>,
    cells: Vec<Vec<f64>>,
}

impl ProbabilityMatrix {
    pub fn new(set: &DieSet) -> Self {
        let dice: Vec<Die> = set.iter().copied().collect();
        let cells = dice
            .iter()
            .map(|row| dice.iter().map(|col| win_probability(row, col)).collect())
            .collect();
        Self { dice, cells }
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn rows(&self) -> impl Iterator<Item = (&Die, &[f64])> {
        self.dice.iter().zip(self.cells.iter().map(Vec::as_slice))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn die(spec: &str) -> Die {
        spec.parse().unwrap()
    }

    #[test]
    fn test_win_probability() {
        let low = die("1,1,1,1,1,1");
        let high = die("2,2,2,2,2,2");
        assert_eq!(win_probability(&high, &low), 1.0);
        assert_eq!(win_probability(&low, &high), 0.0);
        assert_eq!(win_probability(&low, &low), 0.0);
    }

    #[test]
    fn test_standard_die_against_itself() {
        let d6 = die("1,2,3,4,5,6");
        // 15 of 36 pairs are strictly higher.
        assert!((win_probability(&d6, &d6) - 15.0 / 36.0).abs() < 1e-12);
    }

    fn cells(matrix: &ProbabilityMatrix) -> Vec<Vec<f64>> {
        matrix.rows().map(|(_, row)| row.to_vec()).collect()
    }

    #[test]
    fn test_non_transitive_set_beats_in_a_cycle() {
        let set = DieSet::parse(&["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        let cells = cells(&ProbabilityMatrix::new(&set));
        for (row, col) in [(0, 1), (1, 2), (2, 0)] {
            assert!((cells[row][col] - 20.0 / 36.0).abs() < 1e-12);
            assert!(cells[row][col] > cells[col][row]);
        }
    }

    #[test]
    fn test_matrix_rows_follow_set_order() {
        let set = DieSet::parse(&["1,1,1,1,1,1", "2,2,2,2,2,2", "3,3,3,3,3,3"]).unwrap();
        let matrix = ProbabilityMatrix::new(&set);
        let order: Vec<String> = matrix.rows().map(|(die, _)| die.to_string()).collect();
        assert_eq!(order, ["1,1,1,1,1,1", "2,2,2,2,2,2", "3,3,3,3,3,3"]);
        assert_eq!(cells(&matrix)[2], vec![1.0, 1.0, 0.0]);
        assert_eq!(matrix.dice().len(), 3);
    }
}
