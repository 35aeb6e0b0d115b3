use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    let preferred: &[wgpu::TextureFormat] = if prefer_srgb {
        &[wgpu::TextureFormat::Bgra8UnormSrgb, wgpu::TextureFormat::Rgba8UnormSrgb]
    } else {
        // Colors are authored in sRGB space and written unconverted.
        &[wgpu::TextureFormat::Bgra8Unorm, wgpu::TextureFormat::Rgba8Unorm]
    };

    preferred
        .iter()
        .copied()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Applies a new physical size. Returns `true` if the surface was reconfigured.
///
/// wgpu rejects 0×0 surfaces; in that case only `size` is updated and the
/// configure is deferred to the next non-empty size.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut (u32, u32),
    new_size: (u32, u32),
) -> bool {
    let unchanged = *size == new_size && config.width == new_size.0 && config.height == new_size.1;
    *size = new_size;

    if new_size.0 == 0 || new_size.1 == 0 || unchanged {
        return false;
    }

    config.width = new_size.0;
    config.height = new_size.1;
    surface.configure(device, config);
    true
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: (u32, u32),
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if size.0 > 0 && size.1 > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, SurfaceCapabilities, TextureFormat};

    fn caps(formats: &[TextureFormat], alpha: &[CompositeAlphaMode]) -> SurfaceCapabilities {
        SurfaceCapabilities {
            formats: formats.to_vec(),
            alpha_modes: alpha.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn format_follows_srgb_preference() {
        let c = caps(
            &[TextureFormat::Rgba16Float, TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm],
            &[],
        );
        assert_eq!(choose_surface_format(&c, true), Some(TextureFormat::Bgra8UnormSrgb));
        assert_eq!(choose_surface_format(&c, false), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn format_falls_back_to_first_or_none() {
        let c = caps(&[TextureFormat::Rgba16Float], &[]);
        assert_eq!(choose_surface_format(&c, true), Some(TextureFormat::Rgba16Float));
        assert_eq!(choose_surface_format(&caps(&[], &[]), false), None);
    }

    #[test]
    fn unsupported_alpha_mode_is_replaced() {
        let c = caps(&[], &[CompositeAlphaMode::Opaque]);
        assert_eq!(
            choose_alpha_mode(&c, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&caps(&[], &[]), None), CompositeAlphaMode::Auto);
    }
}
