//! Ambient drone: a low sine whose pitch is swept by a slow LFO.

use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{AudioContext, OscillatorType};

use crate::config::AudioConfig;
use crate::error::Result;

/// Output gain is scaled down from the configured volume.
const HEADROOM: f32 = 0.2;

pub struct Drone {
    config: AudioConfig,
    context: Option<AudioContext>,
    playing: bool,
}

impl Drone {
    pub fn new(config: AudioConfig) -> Self {
        Self {
            config,
            context: None,
            playing: false,
        }
    }

    pub fn label(&self) -> &'static str {
        if self.playing {
            "Sound On"
        } else {
            "Sound Off"
        }
    }

    /// Builds the audio graph. Browsers only allow this after a user gesture.
    fn build(&self) -> Result<AudioContext> {
        let ctx = AudioContext::new()?;
        let now = ctx.current_time();

        let osc = ctx.create_oscillator()?;
        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value_at_time(self.config.frequency, now)?;

        let lfo = ctx.create_oscillator()?;
        lfo.set_type(OscillatorType::Sine);
        lfo.frequency().set_value_at_time(self.config.lfo_frequency, now)?;
        let lfo_gain = ctx.create_gain()?;
        lfo_gain.gain().set_value_at_time(self.config.lfo_depth, now)?;
        lfo.connect_with_audio_node(&lfo_gain)?;
        lfo_gain.connect_with_audio_param(&osc.frequency())?;
        lfo.start()?;

        let output = ctx.create_gain()?;
        output.gain().set_value_at_time(self.config.volume * HEADROOM, now)?;
        osc.connect_with_audio_node(&output)?;
        output.connect_with_audio_node(&ctx.destination())?;
        osc.start()?;

        log::info!("drone started at {} Hz", self.config.frequency);
        Ok(ctx)
    }

    pub fn play(&mut self) -> Result<()> {
        let ctx = match &self.context {
            Some(ctx) => ctx.clone(),
            None => {
                let ctx = self.build()?;
                self.context = Some(ctx.clone());
                ctx
            }
        };
        let resume = ctx.resume()?;
        self.playing = true;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(resume).await {
                log::warn!("audio resume rejected: {err:?}");
            }
        });
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        if let Some(ctx) = &self.context {
            // completion is not awaited
            let _ = ctx.suspend()?;
        }
        self.playing = false;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<()> {
        if self.playing {
            self.pause()
        } else {
            self.play()
        }
    }
}
