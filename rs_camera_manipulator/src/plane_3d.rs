pub struct Ray3D {
    pub origin: glam::Vec3,
    pub direction: glam::Vec3,
}

impl Ray3D {
    pub fn new(origin: glam::Vec3, direction: glam::Vec3) -> Ray3D {
        Ray3D { origin, direction }
    }

    pub fn at(&self, t: f32) -> glam::Vec3 {
        self.origin + self.direction * t
    }
}

pub struct Plane3D {
    pub normal_vector: glam::Vec3,
    pub d: f32,
}

impl Plane3D {
    /// `a * x + b * y + c * z + d = 0`
    pub fn from_equation(equation: glam::Vec4) -> Plane3D {
        Plane3D {
            normal_vector: equation.truncate(),
            d: equation.w,
        }
    }

    pub fn signed_distance(&self, point: glam::Vec3) -> f32 {
        (self.normal_vector.dot(point) + self.d) / self.normal_vector.length()
    }

    /// Distance along the ray to the plane, if the ray hits it in front of its origin.
    pub fn intersection_distance(&self, ray: &Ray3D) -> Option<f32> {
        let denominator = self.normal_vector.dot(ray.direction);
        if denominator.abs() <= f32::EPSILON {
            return None;
        }
        let t = -(self.normal_vector.dot(ray.origin) + self.d) / denominator;
        if t >= 0.0 {
            Some(t)
        } else {
            None
        }
    }

    pub fn intersection_ray(&self, ray: &Ray3D) -> Option<glam::Vec3> {
        self.intersection_distance(ray).map(|t| ray.at(t))
    }
}
