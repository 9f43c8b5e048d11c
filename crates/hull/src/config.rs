//! Configuration object.

/// The four switches the engine takes, as a chainable builder.
///
/// Named after the original polymake solver's `expecting_redundant` /
/// `for_cone` / `making_triangulation` / `computing_vertices` builder
/// methods, which this type reproduces one-for-one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub expect_redundant: bool,
    pub for_cone: bool,
    pub make_triangulation: bool,
    pub compute_vertices: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            expect_redundant: false,
            for_cone: false,
            make_triangulation: true,
            compute_vertices: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true`: input may contain interior/duplicate/collinear points.
    /// `false`: input is certified vertices/rays; redundancy is fatal.
    pub fn with_expect_redundant(mut self, flag: bool) -> Self {
        self.expect_redundant = flag;
        self
    }

    /// `true`: the polyhedron is a cone rooted at the origin.
    pub fn with_for_cone(mut self, flag: bool) -> Self {
        self.for_cone = flag;
        self
    }

    /// `true`: populate and return the placing triangulation.
    pub fn with_make_triangulation(mut self, flag: bool) -> Self {
        self.make_triangulation = flag;
        self
    }

    /// `true`: input is inequalities, output is vertices (dual mode).
    pub fn with_compute_vertices(mut self, flag: bool) -> Self {
        self.compute_vertices = flag;
        self
    }
}
