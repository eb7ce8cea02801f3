//! Camera for primary ray generation.

use std::f32::consts::{FRAC_PI_3, TAU};

use rand::RngCore;
use tinyray_core::CameraDescription;
use tinyray_math::{DegenerateVectorError, Ray, Vec3, Vec3Ext};

use crate::gen_f32;

/// A look-at camera with an orthonormal `forward`/`right`/`up` basis.
///
/// `right = forward x world_up` and `up = right x forward`, so the basis is
/// right-handed with world up = +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,

    // Lens settings
    fov: f32,            // Field of view in radians
    aperture: f32,       // Lens radius, 0 = pinhole
    focus_distance: f32, // Distance from camera to plane of perfect focus
}

impl Camera {
    /// Create a pinhole camera at `position` looking toward `target`.
    ///
    /// Fails when the view direction is zero or parallel to world up, since
    /// no basis can be built in either case.
    pub fn look_at(position: Vec3, target: Vec3) -> Result<Self, DegenerateVectorError> {
        let forward = (target - position).unit()?;
        let right = forward.cross(Vec3::Y).unit()?;
        let up = right.cross(forward).unit()?;

        Ok(Self {
            position,
            forward,
            right,
            up,
            fov: FRAC_PI_3,
            aperture: 0.0,
            focus_distance: 1.0,
        })
    }

    /// Build the camera described by a scene file.
    pub fn from_description(
        desc: &CameraDescription,
        fov: f32,
    ) -> Result<Self, DegenerateVectorError> {
        Ok(
            Self::look_at(Vec3::from_array(desc.position), Vec3::from_array(desc.look_at))?
                .with_lens(fov, desc.aperture, desc.focus_distance),
        )
    }

    /// Set lens settings.
    pub fn with_lens(mut self, fov: f32, aperture: f32, focus_distance: f32) -> Self {
        self.fov = fov;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aperture(&self) -> f32 {
        self.aperture
    }

    pub fn focus_distance(&self) -> f32 {
        self.focus_distance
    }

    /// True when rays all start at the camera position.
    pub fn is_pinhole(&self) -> bool {
        self.aperture <= 0.0
    }

    /// Express a world direction in the camera basis as `(right, up, forward)`.
    #[inline]
    pub fn to_camera_space(&self, direction: Vec3) -> Vec3 {
        Vec3::new(
            direction.dot(self.right),
            direction.dot(self.up),
            direction.dot(self.forward),
        )
    }

    /// Unit direction through the center of pixel `pixel_index`.
    ///
    /// Pixels are row-major with row 0 at the top of the image.
    pub fn primary_ray(&self, pixel_index: usize, width: u32, height: u32) -> Vec3 {
        let i = (pixel_index % width as usize) as f32;
        let j = (pixel_index / width as usize) as f32;

        let dx = (i + 0.5) - width as f32 / 2.0;
        let dy = -(j + 0.5) + height as f32 / 2.0;
        let proj_dist = height as f32 / (2.0 * (self.fov / 2.0).tan());

        (self.forward * proj_dist + self.right * dx + self.up * dy).normalize()
    }

    /// Depth-of-field ray for pixel `pixel_index`.
    ///
    /// The origin is jittered over a lens disk of radius `aperture` and the
    /// ray is aimed at the pinhole ray's point at `focus_distance`, so that
    /// plane stays sharp.
    pub fn primary_ray_dof(
        &self,
        pixel_index: usize,
        width: u32,
        height: u32,
        rng: &mut dyn RngCore,
    ) -> Ray {
        let direction = self.primary_ray(pixel_index, width, height);
        let focus_point = self.position + direction * self.focus_distance;

        let (lens_x, lens_y) = sample_disk(self.aperture, rng);
        let origin = self.position + self.right * lens_x + self.up * lens_y;

        // Origin and focus point differ by at least focus_distance along forward
        Ray::new(origin, (focus_point - origin).normalize())
    }
}

/// Uniform point in a disk of the given radius, by polar sampling.
///
/// `sqrt` on the radial sample keeps the density uniform over area.
fn sample_disk(radius: f32, rng: &mut dyn RngCore) -> (f32, f32) {
    let angle = TAU * gen_f32(rng);
    let r = radius * gen_f32(rng).sqrt();
    (r * angle.cos(), r * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_default_basis() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z).unwrap();

        assert_close(camera.forward(), Vec3::NEG_Z);
        assert_close(camera.right(), Vec3::X);
        assert_close(camera.up(), Vec3::Y);
        assert!(camera.is_pinhole());
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let camera = Camera::look_at(Vec3::new(3.0, 2.0, 5.0), Vec3::new(-1.0, 0.5, -16.0)).unwrap();
        let (f, r, u) = (camera.forward(), camera.right(), camera.up());

        for v in [f, r, u] {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!(u.y > 0.0);
    }

    #[test]
    fn test_degenerate_look_at() {
        assert!(Camera::look_at(Vec3::ONE, Vec3::ONE).is_err());
        // Straight up leaves right undefined
        assert!(Camera::look_at(Vec3::ZERO, Vec3::Y).is_err());
    }

    #[test]
    fn test_center_ray_points_forward() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z).unwrap();

        // Odd size puts pixel (1, 1) exactly at the center
        let dir = camera.primary_ray(4, 3, 3);
        assert_close(dir, Vec3::NEG_Z);
    }

    #[test]
    fn test_corner_rays() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z)
            .unwrap()
            .with_lens(std::f32::consts::FRAC_PI_2, 0.0, 1.0);

        // 90 degree fov on a 2x2 image: projection distance 1
        let top_left = camera.primary_ray(0, 2, 2);
        assert_close(top_left, Vec3::new(-0.5, 0.5, -1.0).normalize());

        let bottom_right = camera.primary_ray(3, 2, 2);
        assert_close(bottom_right, Vec3::new(0.5, -0.5, -1.0).normalize());
    }

    #[test]
    fn test_primary_rays_are_unit() {
        let camera = Camera::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.0, -10.0))
            .unwrap()
            .with_lens(1.05, 0.0, 1.0);

        for index in [0, 17, 640 * 240 + 320, 640 * 480 - 1] {
            let dir = camera.primary_ray(index, 640, 480);
            assert!((dir.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_to_camera_space() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z).unwrap();

        assert_close(camera.to_camera_space(Vec3::NEG_Z), Vec3::Z);
        assert_close(camera.to_camera_space(Vec3::X), Vec3::X);
        assert_close(camera.to_camera_space(Vec3::Y), Vec3::Y);
    }

    #[test]
    fn test_dof_rays_converge_on_focus_plane() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z)
            .unwrap()
            .with_lens(1.0, 0.5, 8.0);
        let mut rng = StdRng::seed_from_u64(42);

        let index = 12 * 32 + 20;
        let pinhole = camera.primary_ray(index, 32, 24);
        let focus_point = pinhole * 8.0;

        for _ in 0..32 {
            let ray = camera.primary_ray_dof(index, 32, 24, &mut rng);

            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
            // Lens samples stay on the disk in the right/up plane
            assert!(ray.origin.z.abs() < 1e-6);
            assert!(ray.origin.length() <= 0.5 + 1e-5);

            // ... and every ray passes through the focus point
            let t = (focus_point - ray.origin).length();
            assert_close(ray.at(t), focus_point);
        }
    }

    #[test]
    fn test_dof_is_reproducible_with_seed() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z)
            .unwrap()
            .with_lens(1.0, 0.25, 4.0);

        let a = camera.primary_ray_dof(5, 8, 8, &mut StdRng::seed_from_u64(7));
        let b = camera.primary_ray_dof(5, 8, 8, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_aperture_dof_matches_pinhole() {
        let camera = Camera::look_at(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let ray = camera.primary_ray_dof(3, 4, 4, &mut rng);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert_close(ray.direction, camera.primary_ray(3, 4, 4));
    }

    #[test]
    fn test_sample_disk_stays_inside_radius() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..256 {
            let (x, y) = sample_disk(2.0, &mut rng);
            assert!(x * x + y * y <= 4.0 + 1e-4);
        }
    }

    #[test]
    fn test_sample_disk_is_uniform_over_area() {
        let mut rng = StdRng::seed_from_u64(17);
        let n = 20_000;
        let mut inner = 0;
        let mut sum_r2 = 0.0;

        for _ in 0..n {
            let (x, y) = sample_disk(2.0, &mut rng);
            let r2 = x * x + y * y;
            if r2 < 1.0 {
                inner += 1;
            }
            sum_r2 += r2;
        }

        // Half the radius covers a quarter of the area
        let inner_fraction = inner as f32 / n as f32;
        assert!((inner_fraction - 0.25).abs() < 0.02, "inner fraction {}", inner_fraction);

        // E[r^2] = R^2 / 2
        let mean_r2 = sum_r2 / n as f32;
        assert!((mean_r2 - 2.0).abs() < 0.05, "mean r^2 {}", mean_r2);
    }

    #[test]
    fn test_from_description() {
        let desc = CameraDescription {
            position: [0.0, 1.0, 0.0],
            look_at: [0.0, 1.0, -5.0],
            aperture: 0.1,
            focus_distance: 5.0,
        };
        let camera = Camera::from_description(&desc, 1.2).unwrap();

        assert_eq!(camera.position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(camera.fov(), 1.2);
        assert_eq!(camera.aperture(), 0.1);
        assert_eq!(camera.focus_distance(), 5.0);
        assert!(!camera.is_pinhole());
    }
}
