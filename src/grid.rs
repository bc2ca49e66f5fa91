// Graph paper: an N x N grid of lines centered on the origin, plus the
// affine transform between grid coordinates and window pixel coordinates.
// The transform is a scaled 2x2 basis [a,b;c,d] (top-down view, y up in
// grid space) and a pixel offset (e,f) that pans with the mouse.

use crate::geometry::{GridPoint, LineSeg};

pub struct Grid {
    pub n: i32,
    scale: f32,
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    pan_origin: (f32, f32),
    pan_ref: Option<(f32, f32)>,
}

const FIT_MARGIN: f32 = 10.0;

impl Grid {
    pub fn new(n: i32, window_size: (usize, usize)) -> Self {
        let mut grid = Self {
            n,
            scale: 1.0,
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: -1.0,
            e: 0.0,
            f: 0.0,
            pan_origin: (0.0, 0.0),
            pan_ref: None,
        };
        grid.reset(window_size);
        grid
    }

    /// Back to the initial view: top-down basis, origin at the window
    /// center, zoomed so the whole grid fits.
    pub fn reset(&mut self, window_size: (usize, usize)) {
        self.a = 1.0;
        self.b = 0.0;
        self.c = 0.0;
        self.d = -1.0;
        self.e = (window_size.0 / 2) as f32;
        self.f = (window_size.1 / 2) as f32;
        self.pan_origin = (self.e, self.f);
        self.pan_ref = None;
        self.scale = self.zoom_to_fit(window_size);
    }

    fn zoom_to_fit(&self, window_size: (usize, usize)) -> f32 {
        let size_g = (self.n as f32, self.n as f32);
        // Transform the grid size as if it were a point
        let size_p = (
            self.a * size_g.0 + self.b * size_g.1,
            self.c * size_g.0 + self.d * size_g.1,
        );
        let size_p = (size_p.0.abs() + FIT_MARGIN, size_p.1.abs() + FIT_MARGIN);
        let scale_x = window_size.0 as f32 / size_p.0;
        let scale_y = window_size.1 as f32 / size_p.1;
        scale_x.min(scale_y)
    }

    fn scaled(&self) -> (f32, f32, f32, f32) {
        (
            self.a * self.scale,
            self.b * self.scale,
            self.c * self.scale,
            self.d * self.scale,
        )
    }

    fn det(&self) -> f32 {
        let (a, b, c, d) = self.scaled();
        let det = a * d - b * c;
        // Keep the inverse finite
        if det == 0.0 { 0.0001 } else { det }
    }

    /// Grid point to window pixel coordinates.
    pub fn xfm_gp(&self, point: GridPoint) -> (f32, f32) {
        let (a, b, c, d) = self.scaled();
        (
            a * point.x as f32 + b * point.y as f32 + self.e,
            c * point.x as f32 + d * point.y as f32 + self.f,
        )
    }

    /// Grid point to rounded pixel coordinates, for the rasterizer.
    pub fn to_pix(&self, point: GridPoint) -> (i32, i32) {
        let (x, y) = self.xfm_gp(point);
        (x.round() as i32, y.round() as i32)
    }

    /// Window pixel coordinates to the nearest grid point.
    pub fn xfm_pg(&self, point: (f32, f32)) -> GridPoint {
        let (a, b, c, d) = self.scaled();
        let (e, f) = (self.e, self.f);
        let det = self.det();
        let gx = (d / det) * point.0 + (-b / det) * point.1 + (b * f - d * e) / det;
        let gy = (-c / det) * point.0 + (a / det) * point.1 + (c * e - a * f) / det;
        GridPoint::new(gx.round() as i32, gy.round() as i32)
    }

    /// Snap a pixel position to the nearest grid intersection, in pixels.
    pub fn snap(&self, point: (f32, f32)) -> (i32, i32) {
        self.to_pix(self.xfm_pg(point))
    }

    pub fn zoom_in(&mut self) {
        self.scale *= 1.1;
    }

    pub fn zoom_out(&mut self) {
        self.scale *= 0.9;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_ref.is_some()
    }

    pub fn begin_pan(&mut self, mpos: (f32, f32)) {
        self.pan_ref = Some(mpos);
        self.pan_origin = (self.e, self.f);
    }

    /// Track the mouse while panning; no-op unless a pan was started.
    pub fn pan(&mut self, mpos: (f32, f32)) {
        if let Some(reference) = self.pan_ref {
            self.e = self.pan_origin.0 + (mpos.0 - reference.0);
            self.f = self.pan_origin.1 + (mpos.1 - reference.1);
        }
    }

    pub fn end_pan(&mut self) {
        self.pan_ref = None;
        self.pan_origin = (self.e, self.f);
    }

    /// Length of one grid box in pixels (the smaller screen axis).
    /// Artwork sizes (dots, arrow heads, line widths) scale with this.
    pub fn box_size(&self) -> f32 {
        let (a, b, c, d) = self.scaled();
        let size_p = (a + b, c + d);
        size_p.0.abs().min(size_p.1.abs())
    }

    pub fn h_line_segs(&self) -> Vec<LineSeg> {
        let a = -(self.n / 2);
        let b = self.n / 2;
        (a..=b)
            .map(|c| LineSeg::new(GridPoint::new(a, c), GridPoint::new(b, c)))
            .collect()
    }

    pub fn v_line_segs(&self) -> Vec<LineSeg> {
        let a = -(self.n / 2);
        let b = self.n / 2;
        (a..=b)
            .map(|c| LineSeg::new(GridPoint::new(c, a), GridPoint::new(c, b)))
            .collect()
    }
}
