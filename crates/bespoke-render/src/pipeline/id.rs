/// Handle to one pipeline of the [`PipelineSet`](super::PipelineSet).
///
/// The table is fixed: every id has exactly one compiled pipeline once the
/// set is built, so a draw never needs a fallback.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PipelineId {
    /// Flat color triangles. Fills, thick strokes, box glyphs.
    Solid,
    /// Flat color line list. Hairline strokes.
    Stroke,
    KnobHighlight,
    WireGlow,
    ConnectionPulse,
    VuMeter,
    SliderTrack,
    SliderFill,
    SliderHandle,
    Button,
    ButtonHover,
    ToggleSwitch,
    ToggleThumb,
    AdsrEnvelope,
    AdsrGrid,
    Waveform,
    WaveformFilled,
    SpectrumBar,
    SpectrumPeak,
    PanelBackground,
    PanelBordered,
    TextGlow,
    TextShadow,
    ProgressBar,
    ScopeDisplay,
    ScopeGrid,
    LedOn,
    LedOff,
    DialTicks,
    FaderGroove,
    FaderCap,
    ModWheel,
}

impl PipelineId {
    pub const COUNT: usize = 32;

    /// Every id, in table order.
    pub const ALL: [PipelineId; Self::COUNT] = [
        PipelineId::Solid,
        PipelineId::Stroke,
        PipelineId::KnobHighlight,
        PipelineId::WireGlow,
        PipelineId::ConnectionPulse,
        PipelineId::VuMeter,
        PipelineId::SliderTrack,
        PipelineId::SliderFill,
        PipelineId::SliderHandle,
        PipelineId::Button,
        PipelineId::ButtonHover,
        PipelineId::ToggleSwitch,
        PipelineId::ToggleThumb,
        PipelineId::AdsrEnvelope,
        PipelineId::AdsrGrid,
        PipelineId::Waveform,
        PipelineId::WaveformFilled,
        PipelineId::SpectrumBar,
        PipelineId::SpectrumPeak,
        PipelineId::PanelBackground,
        PipelineId::PanelBordered,
        PipelineId::TextGlow,
        PipelineId::TextShadow,
        PipelineId::ProgressBar,
        PipelineId::ScopeDisplay,
        PipelineId::ScopeGrid,
        PipelineId::LedOn,
        PipelineId::LedOff,
        PipelineId::DialTicks,
        PipelineId::FaderGroove,
        PipelineId::FaderCap,
        PipelineId::ModWheel,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Fragment entry point in the canvas shader module.
    pub fn fragment_entry(self) -> &'static str {
        match self {
            PipelineId::Solid | PipelineId::Stroke => "fs_solid",
            PipelineId::KnobHighlight => "fs_knob_highlight",
            PipelineId::WireGlow => "fs_wire_glow",
            PipelineId::ConnectionPulse => "fs_connection_pulse",
            PipelineId::VuMeter => "fs_vu_meter",
            PipelineId::SliderTrack => "fs_slider_track",
            PipelineId::SliderFill => "fs_slider_fill",
            PipelineId::SliderHandle => "fs_slider_handle",
            PipelineId::Button => "fs_button",
            PipelineId::ButtonHover => "fs_button_hover",
            PipelineId::ToggleSwitch => "fs_toggle_switch",
            PipelineId::ToggleThumb => "fs_toggle_thumb",
            PipelineId::AdsrEnvelope => "fs_adsr_envelope",
            PipelineId::AdsrGrid => "fs_adsr_grid",
            PipelineId::Waveform => "fs_waveform",
            PipelineId::WaveformFilled => "fs_waveform_filled",
            PipelineId::SpectrumBar => "fs_spectrum_bar",
            PipelineId::SpectrumPeak => "fs_spectrum_peak",
            PipelineId::PanelBackground => "fs_panel_background",
            PipelineId::PanelBordered => "fs_panel_bordered",
            PipelineId::TextGlow => "fs_text_glow",
            PipelineId::TextShadow => "fs_text_shadow",
            PipelineId::ProgressBar => "fs_progress_bar",
            PipelineId::ScopeDisplay => "fs_scope_display",
            PipelineId::ScopeGrid => "fs_scope_grid",
            PipelineId::LedOn => "fs_led_on",
            PipelineId::LedOff => "fs_led_off",
            PipelineId::DialTicks => "fs_dial_ticks",
            PipelineId::FaderGroove => "fs_fader_groove",
            PipelineId::FaderCap => "fs_fader_cap",
            PipelineId::ModWheel => "fs_mod_wheel",
        }
    }

    /// Only the hairline stroke pipeline draws lines.
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            PipelineId::Stroke => wgpu::PrimitiveTopology::LineList,
            _ => wgpu::PrimitiveTopology::TriangleList,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_order_matches_discriminants() {
        for (i, id) in PipelineId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i, "{id:?}");
        }
    }

    #[test]
    fn only_stroke_shares_the_solid_fragment() {
        let mut seen = HashSet::new();
        for id in PipelineId::ALL {
            if id == PipelineId::Stroke {
                assert_eq!(id.fragment_entry(), PipelineId::Solid.fragment_entry());
                continue;
            }
            assert!(seen.insert(id.fragment_entry()), "duplicate entry for {id:?}");
        }
    }
}
