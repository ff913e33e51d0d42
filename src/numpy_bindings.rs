use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::max_equal_sum::max_equal_sum_windows;
use crate::ruchants_structs::check_constraints;

macro_rules! define_max_equal_sum_numpy {
    ($fname:ident, $val_ty:ty) => {
        #[pyfunction]
        #[pyo3(signature = (values, max_len, min_gap=0))]
        pub fn $fname(
            values:  PyReadonlyArray1<$val_ty>,
            max_len: usize,
            min_gap: usize,
            py: Python<'_>,
        ) -> PyResult<(
            u32,                // count
            i64,                // common sum
            Py<PyArray1<u32>>,  // lefts, 1-based
            Py<PyArray1<u32>>,  // rights, 1-based
        )> {
            let values = values.as_slice()?;
            check_constraints(values, max_len, min_gap)
                .map_err(|e| PyValueError::new_err(e.to_string()))?;

            let answer = max_equal_sum_windows(values, max_len, min_gap);
            let (lefts, rights): (Vec<u32>, Vec<u32>) =
                answer.windows.iter().map(|w| (w.left, w.right)).unzip();

            Ok((
                answer.count,
                answer.sum,
                lefts .into_pyarray(py).to_owned().into(),
                rights.into_pyarray(py).to_owned().into(),
            ))
        }
    };
}

// ── concrete instantiations ────────────────────────────────────────────
define_max_equal_sum_numpy!(max_equal_sum_windows_numpy_i64, i64);
define_max_equal_sum_numpy!(max_equal_sum_windows_numpy_i32, i32);
define_max_equal_sum_numpy!(max_equal_sum_windows_numpy_i16, i16);

#[pymodule]
#[pyo3(name = "ruchants")]
fn ruchants(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(max_equal_sum_windows_numpy_i64, m)?)?;
    m.add_function(wrap_pyfunction!(max_equal_sum_windows_numpy_i32, m)?)?;
    m.add_function(wrap_pyfunction!(max_equal_sum_windows_numpy_i16, m)?)?;

    Ok(())
}
