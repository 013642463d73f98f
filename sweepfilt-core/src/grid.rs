//! The axis tuple: 2 or 3 mutually consistent measurement arrays.

use ndarray::{Array1, Array2, Axis};

use crate::error::{Error, Result};

/// Named measurement axis of a gridded dataset.
///
/// X varies along rows (array axis 0), Y along columns (array axis 1),
/// matching the meshgrid orientation of the data loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// The X (row) axis.
    X,
    /// The Y (column) axis.
    Y,
}

impl GridAxis {
    /// The corresponding ndarray axis.
    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            GridAxis::X => Axis(0),
            GridAxis::Y => Axis(1),
        }
    }

    /// The perpendicular axis.
    #[inline]
    pub fn other(self) -> GridAxis {
        match self {
            GridAxis::X => GridAxis::Y,
            GridAxis::Y => GridAxis::X,
        }
    }
}

/// One of the named arrays in the tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The X coordinate array.
    X,
    /// The Y array (coordinate grid, or the dependent in 2-column data).
    Y,
    /// The Z (dependent) array of 3-column data.
    Z,
}

/// The axis tuple holding raw or processed measurement data.
///
/// 3-column data stores three `(nx, ny)` grids: X and Y coordinate grids
/// plus the measured quantity Z. 2-column data stores X and Y as `(n, 1)`
/// column grids with no Z; the dependent quantity is then Y.
///
/// All arrays keep mutually consistent shapes; shape-changing transforms
/// must update every array or fail. [`DataGrid::validate`] checks the
/// invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct DataGrid {
    /// X coordinate grid.
    pub x: Array2<f64>,
    /// Y grid: coordinates for 3-column data, the dependent for 2-column.
    pub y: Array2<f64>,
    /// Measured quantity of 3-column data.
    pub z: Option<Array2<f64>>,
}

impl DataGrid {
    /// Builds a 2-column (line) tuple from two equally long 1D arrays.
    pub fn from_line(x: Array1<f64>, y: Array1<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::ShapeMismatch(format!(
                "line arrays differ in length: {} vs {}",
                x.len(),
                y.len()
            )));
        }
        let n = x.len();
        let reshape = |a: Array1<f64>| {
            a.into_shape_with_order((n, 1))
                .map_err(|e| Error::ShapeMismatch(e.to_string()))
        };
        Ok(Self {
            x: reshape(x)?,
            y: reshape(y)?,
            z: None,
        })
    }

    /// Builds a 3-column (grid) tuple from three equally shaped 2D arrays.
    pub fn from_grid(x: Array2<f64>, y: Array2<f64>, z: Array2<f64>) -> Result<Self> {
        let grid = Self { x, y, z: Some(z) };
        grid.validate()?;
        Ok(grid)
    }

    /// True for 2-column data.
    #[inline]
    pub fn is_line(&self) -> bool {
        self.z.is_none()
    }

    /// Number of columns in the source dataset (2 or 3).
    #[inline]
    pub fn columns(&self) -> usize {
        if self.is_line() {
            2
        } else {
            3
        }
    }

    /// Common shape of the tuple arrays.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// The dependent (measured) array: Z when present, otherwise Y.
    #[inline]
    pub fn dependent(&self) -> &Array2<f64> {
        self.z.as_ref().unwrap_or(&self.y)
    }

    /// Mutable access to the dependent array.
    #[inline]
    pub fn dependent_mut(&mut self) -> &mut Array2<f64> {
        self.z.as_mut().unwrap_or(&mut self.y)
    }

    /// Replaces the dependent array. The caller is responsible for keeping
    /// shapes consistent; the pipeline runner re-validates after every
    /// transform.
    pub fn set_dependent(&mut self, values: Array2<f64>) {
        match &mut self.z {
            Some(z) => *z = values,
            None => self.y = values,
        }
    }

    /// The named array, if the tuple carries it.
    pub fn target(&self, target: Target) -> Result<&Array2<f64>> {
        match target {
            Target::X => Ok(&self.x),
            Target::Y => Ok(&self.y),
            Target::Z => self
                .z
                .as_ref()
                .ok_or_else(|| Error::DegenerateResult("2-column data has no Z array".into())),
        }
    }

    /// Mutable access to the named array.
    pub fn target_mut(&mut self, target: Target) -> Result<&mut Array2<f64>> {
        match target {
            Target::X => Ok(&mut self.x),
            Target::Y => Ok(&mut self.y),
            Target::Z => self
                .z
                .as_mut()
                .ok_or_else(|| Error::DegenerateResult("2-column data has no Z array".into())),
        }
    }

    /// Checks that every array in the tuple has the same shape and that
    /// none of them is empty.
    pub fn validate(&self) -> Result<()> {
        let dim = self.x.dim();
        if self.y.dim() != dim {
            return Err(Error::ShapeMismatch(format!(
                "x is {:?} but y is {:?}",
                dim,
                self.y.dim()
            )));
        }
        if let Some(z) = &self.z {
            if z.dim() != dim {
                return Err(Error::ShapeMismatch(format!(
                    "x is {:?} but z is {:?}",
                    dim,
                    z.dim()
                )));
            }
        }
        if self.x.is_empty() {
            return Err(Error::DegenerateResult("axis tuple is empty".into()));
        }
        Ok(())
    }
}
