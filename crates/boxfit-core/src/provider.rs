use crate::Result;
use crate::query::GeometryMap;

/// Source of per-object bounding boxes for a serialized SVG document.
pub trait GeometryProvider {
    fn resolve(&self, svg: &str) -> Result<GeometryMap>;
}

/// A fixed geometry map, independent of the document it is asked about.
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    map: GeometryMap,
}

impl StaticGeometry {
    pub fn new(map: GeometryMap) -> Self {
        Self { map }
    }

    /// Loads a recorded `--query-all` dump.
    pub fn from_query_all(output: &str) -> Result<Self> {
        Ok(Self::new(crate::query::parse_query_all(output)?))
    }
}

impl GeometryProvider for StaticGeometry {
    fn resolve(&self, _svg: &str) -> Result<GeometryMap> {
        Ok(self.map.clone())
    }
}

impl<P: GeometryProvider + ?Sized> GeometryProvider for &P {
    fn resolve(&self, svg: &str) -> Result<GeometryMap> {
        (**self).resolve(svg)
    }
}

impl<P: GeometryProvider + ?Sized> GeometryProvider for Box<P> {
    fn resolve(&self, svg: &str) -> Result<GeometryMap> {
        (**self).resolve(svg)
    }
}
