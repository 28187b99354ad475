use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Row-major matrix of `f64`. One `Matrix` holds the weights between two
/// adjacent layers: `data[a][b]` is the weight from node `a` in the earlier
/// layer to node `b` in the later one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Every entry drawn independently and uniformly from `[min, max)`.
    pub fn random_range(rows: usize, cols: usize, min: f64, max: f64) -> Matrix {
        let mut rng = rand::thread_rng();
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * (max - min) + min;
            }
        }

        res
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_requested_shape() {
        let m = Matrix::zeros(3, 5);
        assert_eq!(m.rows, 3);
        assert_eq!(m.cols, 5);
        assert!(m.data.iter().all(|row| row.len() == 5));
        assert!(m.data.iter().flatten().all(|&x| x == 0.0));
    }

    #[test]
    fn random_range_respects_bounds() {
        let m = Matrix::random_range(10, 10, -0.5, 1.5);
        for &x in m.data.iter().flatten() {
            assert!((-0.5..1.5).contains(&x));
        }
    }

    #[test]
    fn from_data_infers_shape() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        assert_eq!((m.rows, m.cols), (3, 2));
        assert_eq!(m.data[2][1], 6.0);
    }
}
