use rand::Rng;
use std::ops::{Add, Mul, Sub};

/// Dense row-major matrix. Samples are rows throughout the crate, so a batch
/// of `n` inputs with `d` features is an `n × d` matrix.
#[derive(Debug, Clone, PartialEq)]
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

    /// Glorot (Xavier) uniform initialization: samples from
    /// U(-b, b) with b = sqrt(factor / (rows + cols)).
    ///
    /// `factor` is 6 for ReLU/Tanh/Identity layers and 2 for Logistic ones.
    /// Shape: (rows, cols) where `rows` is the fan-in and `cols` the fan-out.
    pub fn glorot_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        factor: f64,
        rng: &mut R,
    ) -> Matrix {
        let bound = (factor / (rows + cols) as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for x in row.iter_mut() {
                *x = rng.gen_range(-bound..=bound);
            }
        }
        res
    }

    /// Builds a matrix from rows. All rows must have the same length; an
    /// empty `data` gives a 0×0 matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, |row| row.len());
        assert!(
            data.iter().all(|row| row.len() == cols),
            "Matrix rows must all have the same length"
        );
        Matrix {
            rows: data.len(),
            cols,
            data,
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Combines two same-shape matrices element by element.
    pub fn zip_map<F>(&self, other: &Matrix, functor: F) -> Matrix
    where
        F: Fn(f64, f64) -> f64,
    {
        self.assert_same_shape(other);
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a.iter().zip(b.iter()).map(|(&x, &y)| functor(x, y)).collect())
                .collect(),
        }
    }

    /// Element-wise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> Matrix {
        self.zip_map(other, |x, y| x * y)
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Adds a 1×cols row vector to every row (bias broadcast).
    pub fn add_row(&self, row: &Matrix) -> Matrix {
        assert!(
            row.rows == 1 && row.cols == self.cols,
            "Row vector of shape {}x{} cannot be broadcast onto {}x{}",
            row.rows,
            row.cols,
            self.rows,
            self.cols
        );
        let bias = &row.data[0];
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|r| r.iter().zip(bias.iter()).map(|(x, b)| x + b).collect())
                .collect(),
        }
    }

    /// Column means as a 1×cols matrix.
    pub fn column_means(&self) -> Matrix {
        let mut sums = vec![0.0; self.cols];
        for row in &self.data {
            for (s, x) in sums.iter_mut().zip(row.iter()) {
                *s += x;
            }
        }
        if self.rows > 0 {
            let n = self.rows as f64;
            sums.iter_mut().for_each(|s| *s /= n);
        }
        Matrix {
            rows: 1,
            cols: self.cols,
            data: vec![sums],
        }
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.data.iter().flatten().map(|x| x * x).sum()
    }

    /// New matrix holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Matrix {
        Matrix {
            rows: indices.len(),
            cols: self.cols,
            data: indices.iter().map(|&i| self.data[i].clone()).collect(),
        }
    }

    /// Index of the largest value in each row; ties resolve to the lowest index.
    pub fn argmax_rows(&self) -> Vec<usize> {
        self.data.iter().map(|row| argmax(row)).collect()
    }

    fn assert_same_shape(&self, other: &Matrix) {
        if self.rows != other.rows || self.cols != other.cols {
            panic!(
                "Matrices are of incorrect sizes: {}x{} vs {}x{}",
                self.rows, self.cols, other.rows, other.cols
            )
        }
    }
}

/// Index of the maximum element in a slice. Returns 0 for an empty slice.
pub fn argmax(v: &[f64]) -> usize {
    let mut best = 0;
    for (i, &x) in v.iter().enumerate() {
        if x > v[best] {
            best = i;
        }
    }
    best
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!(
                "Matrices are of incorrect sizes: {}x{} * {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            let lhs_row = &self.data[i];
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += lhs_row[k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn multiplies_and_transposes() {
        let a = Matrix::from_data(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let b = a.transpose();
        assert_eq!((b.rows, b.cols), (3, 2));

        let c = &a * &b;
        assert_eq!(c.data, vec![vec![14.0, 32.0], vec![32.0, 77.0]]);
    }

    #[test]
    #[should_panic(expected = "incorrect sizes")]
    fn mul_rejects_mismatched_shapes() {
        let a = Matrix::zeros(2, 3);
        let _ = &a * &a;
    }

    #[test]
    fn broadcasts_bias_and_reduces_columns() {
        let m = Matrix::from_data(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let bias = Matrix::from_data(vec![vec![10.0, -1.0]]);
        assert_eq!(m.add_row(&bias).data, vec![vec![11.0, 1.0], vec![13.0, 3.0]]);
        assert_eq!(m.column_means().data, vec![vec![2.0, 3.0]]);
        assert_eq!(m.sum_of_squares(), 30.0);
    }

    #[test]
    fn glorot_init_is_seeded_and_bounded() {
        let a = Matrix::glorot_uniform(4, 10, 6.0, &mut ChaCha8Rng::seed_from_u64(42));
        let b = Matrix::glorot_uniform(4, 10, 6.0, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);

        let bound = (6.0f64 / 14.0).sqrt();
        assert!(a.data.iter().flatten().all(|x| x.abs() <= bound));
    }

    #[test]
    fn argmax_prefers_first_of_ties() {
        assert_eq!(argmax(&[0.2, 0.5, 0.5]), 1);
        assert_eq!(argmax(&[]), 0);
        let m = Matrix::from_data(vec![vec![0.1, 0.9], vec![0.7, 0.3]]);
        assert_eq!(m.argmax_rows(), vec![1, 0]);
    }
}
