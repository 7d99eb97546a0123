use serde::{Deserialize, Serialize};

use crate::algebra::Vec3;

/// Local field at the probe split into its three contributions (T).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldComponents {
    /// Contact field per unit contact coupling.
    pub contact: Vec3,
    pub dipolar: Vec3,
    pub lorentz: Vec3,
}

impl FieldComponents {
    pub fn new(contact: Vec3, dipolar: Vec3, lorentz: Vec3) -> Self {
        Self {
            contact,
            dipolar,
            lorentz,
        }
    }

    pub fn zero() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros(), Vec3::zeros())
    }

    /// Contact, dipolar and Lorentz components one after the other.
    pub fn to_flat(&self) -> [f64; 9] {
        let mut flat = [0.0; 9];
        flat[0..3].copy_from_slice(self.contact.as_slice());
        flat[3..6].copy_from_slice(self.dipolar.as_slice());
        flat[6..9].copy_from_slice(self.lorentz.as_slice());
        flat
    }
}

impl Default for FieldComponents {
    fn default() -> Self {
        Self::zero()
    }
}

/// Flatten a sweep into consecutive `[contact, dipolar, lorentz]` blocks of 9 values.
pub fn flatten(sweep: &[FieldComponents]) -> Vec<f64> {
    sweep.iter().flat_map(|fields| fields.to_flat()).collect()
}

/// Field components of a sweep together with the contact coupling of the probe.
///
/// The engines return the contact field for a unit coupling; the physical
/// contact field is obtained by scaling with `contact_coupling` (Å⁻³).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalFields {
    pub components: Vec<FieldComponents>,
    #[serde(default)]
    pub contact_coupling: f64,
}

impl LocalFields {
    pub fn new(components: Vec<FieldComponents>) -> Self {
        Self {
            components,
            contact_coupling: 0.0,
        }
    }

    pub fn with_contact_coupling(mut self, contact_coupling: f64) -> Self {
        self.contact_coupling = contact_coupling;
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn lorentz(&self) -> Vec<Vec3> {
        self.components.iter().map(|c| c.lorentz).collect()
    }

    pub fn dipolar(&self) -> Vec<Vec3> {
        self.components.iter().map(|c| c.dipolar).collect()
    }

    /// Contact field scaled by the contact coupling.
    pub fn contact(&self) -> Vec<Vec3> {
        self.components
            .iter()
            .map(|c| c.contact * self.contact_coupling)
            .collect()
    }

    /// Lorentz + dipolar + coupling · contact, per angle.
    pub fn total(&self) -> Vec<Vec3> {
        self.components
            .iter()
            .map(|c| c.lorentz + c.dipolar + c.contact * self.contact_coupling)
            .collect()
    }
}

impl From<Vec<FieldComponents>> for LocalFields {
    fn from(components: Vec<FieldComponents>) -> Self {
        Self::new(components)
    }
}

impl From<FieldComponents> for LocalFields {
    fn from(components: FieldComponents) -> Self {
        Self::new(vec![components])
    }
}
