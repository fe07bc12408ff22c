/// Read-only row access over a single-channel raster.
pub trait ImageView {
    type Pixel: Copy + PartialOrd;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    /// Smallest and largest sample, or `None` for an empty raster.
    ///
    /// Incomparable samples (NaN) are skipped.
    fn min_max(&self) -> Option<(Self::Pixel, Self::Pixel)>
    where
        Self: Sized,
    {
        let mut acc: Option<(Self::Pixel, Self::Pixel)> = None;
        for row in self.rows() {
            for &v in row {
                if v.partial_cmp(&v).is_none() {
                    continue;
                }
                acc = Some(match acc {
                    None => (v, v),
                    Some((lo, hi)) => (
                        if v < lo { v } else { lo },
                        if v > hi { v } else { hi },
                    ),
                });
            }
        }
        acc
    }
}

pub trait ImageViewMut: ImageView {
    fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, Self::Pixel>;
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
