//! Static scene data around the plant: ground quad, skybox cube and a simple
//! fly-around camera.
//!
//! Nothing here touches a graphics API; the viewer uploads these arrays and
//! feeds the camera matrices to its shaders. [`Scene`] bundles them with the
//! viewer toggles (wireframe floor, idle spin).

use glam::{Mat3, Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Ground color (brown).
pub const FLOOR_COLOR: Vec3 = Vec3::new(0.7, 0.4, 0.1);

/// Corners of the unit floor centered under the origin at `y = -0.5`.
const FLOOR_CORNERS: [Vec3; 4] = [
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
];

/// The floor as two triangles (6 vertices) with a uniform color.
pub fn floor() -> ([Vec3; 6], [Vec3; 6]) {
    let [a, b, c, d] = FLOOR_CORNERS;
    ([b, a, c, c, d, b], [FLOOR_COLOR; 6])
}

/// Skybox cube, 36 vertices (12 triangles), positions only.
pub const SKYBOX_VERTICES: [[f32; 3]; 36] = [
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    //
    [-1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    //
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    //
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    //
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    //
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
];

/// Cubemap face images in upload order (+X, -X, +Y, -Y, +Z, -Z).
const SKYBOX_FACES: [&str; 6] = [
    "right.jpg",
    "left.jpg",
    "top.jpg",
    "bottom.jpg",
    "front.jpg",
    "back.jpg",
];

/// Resolves the six cubemap face paths under `dir`.
pub fn skybox_faces(dir: impl AsRef<Path>) -> [PathBuf; 6] {
    let dir = dir.as_ref();
    SKYBOX_FACES.map(|name| dir.join(name))
}

/// Discrete viewer inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewerInput {
    Forward,
    Back,
    Left,
    Right,
    /// Recenter translation (space).
    ResetPosition,
    /// Left click.
    YawLeft,
    /// Right click.
    YawRight,
    /// Middle click.
    ResetYaw,
    /// `f`: solid / wireframe floor.
    ToggleFloor,
    /// `a`: start or stop spinning while idle.
    ToggleSpin,
}

/// Camera that slides the scene in the XZ-plane and spins it about Y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlyCamera {
    /// Scene translation along X.
    pub x: f32,
    /// Scene translation along Z.
    pub z: f32,
    /// Scene yaw in degrees.
    pub yaw: f32,
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            x: 0.0,
            z: 0.0,
            yaw: 0.0,
            fovy: 45.0,
            near: 0.5,
            far: 2.0,
        }
    }
}

impl FlyCamera {
    pub const MOVE_STEP: f32 = 0.1;
    pub const YAW_STEP: f32 = 11.0;

    const EYE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    pub fn apply(&mut self, input: ViewerInput) {
        match input {
            ViewerInput::Forward => self.z += Self::MOVE_STEP,
            ViewerInput::Back => self.z -= Self::MOVE_STEP,
            ViewerInput::Left => self.x += Self::MOVE_STEP,
            ViewerInput::Right => self.x -= Self::MOVE_STEP,
            ViewerInput::ResetPosition => {
                self.x = 0.0;
                self.z = 0.0;
            }
            ViewerInput::YawLeft => self.yaw += Self::YAW_STEP,
            ViewerInput::YawRight => self.yaw -= Self::YAW_STEP,
            ViewerInput::ResetYaw => self.yaw = 0.0,
            ViewerInput::ToggleFloor | ViewerInput::ToggleSpin => {}
        }
    }

    fn look_at() -> Mat4 {
        Mat4::look_at_rh(Self::EYE, Vec3::ZERO, Vec3::Y)
    }

    /// Model-view matrix for the plant and floor.
    pub fn view(&self) -> Mat4 {
        Self::look_at()
            * Mat4::from_translation(Vec3::new(self.x, 0.0, self.z))
            * Mat4::from_rotation_y(self.yaw.to_radians())
    }

    /// View matrix for the skybox: rotation only, facing the opposite way.
    pub fn skybox_view(&self) -> Mat4 {
        let m = Self::look_at() * Mat4::from_rotation_y((180.0 + self.yaw).to_radians());
        Mat4::from_mat3(Mat3::from_mat4(m))
    }

    /// OpenGL-style perspective projection for a `width` x `height` viewport.
    pub fn projection(&self, width: f32, height: f32) -> Mat4 {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Mat4::perspective_rh_gl(self.fovy.to_radians(), aspect, self.near, self.far)
    }
}

/// Everything drawn around the plant, plus the viewer's toggles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub floor_positions: [Vec3; 6],
    pub floor_colors: [Vec3; 6],
    /// Draw the floor as lines instead of filled triangles.
    pub floor_wireframe: bool,
    /// Cubemap faces; `None` draws no skybox.
    pub skybox_faces: Option<[PathBuf; 6]>,
    pub camera: FlyCamera,
    /// Spin the scene about Y on every idle tick.
    pub auto_spin: bool,
}

impl Default for Scene {
    fn default() -> Self {
        let (floor_positions, floor_colors) = floor();
        Self {
            floor_positions,
            floor_colors,
            floor_wireframe: false,
            skybox_faces: None,
            camera: FlyCamera::default(),
            auto_spin: false,
        }
    }
}

impl Scene {
    /// Degrees added to the yaw per idle tick while spinning.
    pub const AUTO_SPIN_STEP: f32 = 0.3;

    pub fn with_floor_wireframe(mut self, wireframe: bool) -> Self {
        self.floor_wireframe = wireframe;
        self
    }

    pub fn with_skybox(mut self, dir: impl AsRef<Path>) -> Self {
        self.skybox_faces = Some(skybox_faces(dir));
        self
    }

    pub fn apply(&mut self, input: ViewerInput) {
        match input {
            ViewerInput::ToggleFloor => self.floor_wireframe = !self.floor_wireframe,
            ViewerInput::ToggleSpin => self.auto_spin = !self.auto_spin,
            other => self.camera.apply(other),
        }
    }

    /// Advances the idle animation by one tick.
    pub fn idle(&mut self) {
        if self.auto_spin {
            self.camera.yaw += Self::AUTO_SPIN_STEP;
        }
    }
}
