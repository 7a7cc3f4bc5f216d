use crate::complex::Complex;
use crate::error::CoreError;

/// A rectangular region of the complex plane sampled at a fixed step.
///
/// Cell `(row m, col n)` maps to `re_min + n·resolution +
/// i·(im_min + m·resolution)`: row 0 corresponds to `im_min`, so the top of
/// the output matches the minimum imaginary part. Consumers that want a
/// conventional mathematical orientation must flip rows themselves.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GridSpec {
    pub re_min: f64,
    pub re_max: f64,
    pub im_min: f64,
    pub im_max: f64,
    /// Complex-plane units per cell.
    pub resolution: f64,
}

/// Helper for deserialization — re-runs constructor validation on load.
impl<'de> serde::Deserialize<'de> for GridSpec {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            re_min: f64,
            re_max: f64,
            im_min: f64,
            im_max: f64,
            resolution: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        GridSpec::new(raw.re_min, raw.re_max, raw.im_min, raw.im_max, raw.resolution)
            .map_err(serde::de::Error::custom)
    }
}

impl GridSpec {
    /// Create a grid over `[re_min, re_max] × [im_min, im_max]`.
    pub fn new(
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        resolution: f64,
    ) -> crate::Result<Self> {
        if resolution <= 0.0 || !resolution.is_finite() {
            return Err(CoreError::InvalidGrid {
                reason: format!("resolution must be positive and finite, got {resolution}"),
            });
        }
        if re_max <= re_min || im_max <= im_min {
            return Err(CoreError::InvalidGrid {
                reason: format!(
                    "empty or inverted region [{re_min}, {re_max}] × [{im_min}, {im_max}]"
                ),
            });
        }
        Ok(Self {
            re_min,
            re_max,
            im_min,
            im_max,
            resolution,
        })
    }

    /// A grid spanning `[−extent, extent]` on both axes.
    ///
    /// Pairs with the map's escape bound to produce the default region that
    /// is guaranteed to contain the entire bounded set.
    pub fn symmetric(extent: f64, resolution: f64) -> crate::Result<Self> {
        Self::new(-extent, extent, -extent, extent, resolution)
    }

    /// Number of columns: `⌊(re_max − re_min)/resolution⌋ + 1`.
    pub fn width(&self) -> u32 {
        ((self.re_max - self.re_min) / self.resolution) as u32 + 1
    }

    /// Number of rows: `⌊(im_max − im_min)/resolution⌋ + 1`.
    pub fn height(&self) -> u32 {
        ((self.im_max - self.im_min) / self.resolution) as u32 + 1
    }

    /// The complex value at cell `(row, col)`.
    #[inline]
    pub fn cell_to_complex(&self, row: u32, col: u32) -> Complex {
        Complex::new(
            self.re_min + col as f64 * self.resolution,
            self.im_min + row as f64 * self.resolution,
        )
    }
}

/// A fully-populated `height × width` grid of scalars, row-major.
///
/// Created once per sampling run and handed to the consumer as-is; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f64>,
}

impl ScalarField {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    /// The scalar at `(row, col)`.
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> f64 {
        self.data[row as usize * self.width as usize + col as usize]
    }

    #[inline]
    pub fn set(&mut self, row: u32, col: u32, value: f64) {
        self.data[row as usize * self.width as usize + col as usize] = value;
    }

    /// Copy a complete row of scalars into place.
    pub fn fill_row(&mut self, row: u32, values: &[f64]) {
        debug_assert_eq!(values.len(), self.width as usize);
        let start = row as usize * self.width as usize;
        self.data[start..start + self.width as usize].copy_from_slice(values);
    }
}
