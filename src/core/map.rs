use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

/// Zoom used when a search centers the map
pub const SEARCH_ZOOM: f64 = 12.0;

/// Zoom of a map that has not been centered yet
pub const WORLD_ZOOM: f64 = 2.0;

/// Map widget capability
///
/// The search flow only needs to move the viewport and place one marker;
/// any mapping library can sit behind this.
pub trait MapView {
    fn set_center(&mut self, center: Coordinates, zoom: f64);

    fn set_marker(&mut self, position: Coordinates, label: Option<&str>);

    /// Release the widget. Called exactly once by [`MountedMap`].
    fn dispose(&mut self);
}

/// Scoped ownership of a mounted map
///
/// Created on mount; disposes the view either through [`MountedMap::unmount`]
/// or when dropped, never both.
pub struct MountedMap<V: MapView> {
    view: Option<V>,
}

impl<V: MapView> MountedMap<V> {
    pub fn mount(view: V) -> Self {
        Self { view: Some(view) }
    }

    /// Center on `coords` and pin it with `label`
    pub fn focus(&mut self, coords: Coordinates, label: Option<&str>) {
        if let Some(view) = self.view.as_mut() {
            view.set_center(coords, SEARCH_ZOOM);
            view.set_marker(coords, label.filter(|l| !l.is_empty()));
        }
    }

    /// Dispose the view and hand it back for inspection
    pub fn unmount(mut self) -> Option<V> {
        let mut view = self.view.take()?;
        view.dispose();
        Some(view)
    }
}

impl<V: MapView> Drop for MountedMap<V> {
    fn drop(&mut self) {
        if let Some(mut view) = self.view.take() {
            view.dispose();
        }
    }
}

/// Pin on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub position: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Viewport description returned to clients that render their own map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    pub center: Option<Coordinates>,
    pub zoom: f64,
    pub marker: Option<MapMarker>,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            center: None,
            zoom: WORLD_ZOOM,
            marker: None,
        }
    }
}

/// [`MapView`] that records calls into a [`MapState`]
#[derive(Debug, Default)]
pub struct ViewportRecorder {
    state: MapState,
    disposed: bool,
}

impl ViewportRecorder {
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn state(&self) -> &MapState {
        &self.state
    }

    pub fn into_state(self) -> MapState {
        self.state
    }
}

impl MapView for ViewportRecorder {
    fn set_center(&mut self, center: Coordinates, zoom: f64) {
        self.state.center = Some(center);
        self.state.zoom = zoom;
    }

    fn set_marker(&mut self, position: Coordinates, label: Option<&str>) {
        match self.state.marker.as_mut() {
            Some(marker) => {
                marker.position = position;
                marker.label = label.map(str::to_string);
            }
            None => {
                self.state.marker = Some(MapMarker {
                    position,
                    label: label.map(str::to_string),
                });
            }
        }
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

/// Viewport for a search centered on `coords`, or the default world view
pub fn viewport_for(coords: Option<Coordinates>, label: &str) -> MapState {
    let mut map = MountedMap::mount(ViewportRecorder::default());
    if let Some(coords) = coords {
        map.focus(coords, Some(label));
    }
    map.unmount().map(ViewportRecorder::into_state).unwrap_or_default()
}
