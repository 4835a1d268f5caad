use crate::service::TextureImporter;
use glimmer_core::{BakeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Import settings persisted next to a baked texture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImportSettings {
    pub mip_bias: f32,
}

/// Path of the sidecar holding a texture's import settings.
pub fn sidecar_path(texture: &Path) -> PathBuf {
    let mut path = texture.as_os_str().to_os_string();
    path.push(".import");
    PathBuf::from(path)
}

/// `TextureImporter` backed by a bincode sidecar file, standing in for
/// the host engine's importer metadata. Re-applying the same bias leaves
/// the sidecar byte-identical.
pub struct SidecarImporter;

impl SidecarImporter {
    pub fn read_settings(texture: &Path) -> Result<Option<ImportSettings>> {
        let sidecar = sidecar_path(texture);
        if !sidecar.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&sidecar)?;
        let settings = bincode::deserialize(&bytes)
            .map_err(|e| BakeError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok(Some(settings))
    }
}

impl TextureImporter for SidecarImporter {
    fn apply_mip_bias(&mut self, texture: &Path, bias: f32) -> Result<()> {
        if !texture.exists() {
            return Err(BakeError::AssetNotFound(texture.to_path_buf()));
        }

        let settings = ImportSettings { mip_bias: bias };
        let bytes = bincode::serialize(&settings)
            .map_err(|e| BakeError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(sidecar_path(texture), bytes)?;

        log::debug!("applied mip bias {bias} to {}", texture.display());
        Ok(())
    }
}
