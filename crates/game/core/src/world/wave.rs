//! Timed wave spawning.

use crate::definitions::WaveDefinition;

/// Tracks when each wave of a stage fires next.
#[derive(Clone, Debug, Default)]
pub struct WaveSchedule {
    waves: Vec<ScheduledWave>,
}

#[derive(Clone, Debug)]
struct ScheduledWave {
    wave: WaveDefinition,
    next_at: Option<f32>,
}

impl WaveSchedule {
    pub fn new(waves: &[WaveDefinition]) -> Self {
        Self {
            waves: waves
                .iter()
                .map(|wave| ScheduledWave {
                    wave: wave.clone(),
                    next_at: Some(wave.start_time),
                })
                .collect(),
        }
    }

    /// Returns every wave due at `now` (and before `stage_end`), advancing
    /// repeating waves to their next start. A wave that fell several repeats
    /// behind fires once per missed repeat.
    pub fn due(&mut self, now: f32, stage_end: f32) -> Vec<WaveDefinition> {
        let mut fired = Vec::new();
        for scheduled in &mut self.waves {
            while let Some(at) = scheduled.next_at {
                if at > now || at >= stage_end {
                    break;
                }
                fired.push(scheduled.wave.clone());
                scheduled.next_at = scheduled.wave.repeat_every.map(|every| at + every);
            }
        }
        fired
    }

    /// True once no wave will fire again before `stage_end`.
    pub fn is_exhausted(&self, stage_end: f32) -> bool {
        self.waves
            .iter()
            .all(|w| w.next_at.is_none_or(|at| at >= stage_end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_wave_fires_once() {
        let mut schedule = WaveSchedule::new(&[WaveDefinition::new(2.0, "slime", 3, 8.0)]);
        assert!(schedule.due(1.9, 60.0).is_empty());
        assert_eq!(schedule.due(2.0, 60.0).len(), 1);
        assert!(schedule.due(50.0, 60.0).is_empty());
        assert!(schedule.is_exhausted(60.0));
    }

    #[test]
    fn repeating_wave_stops_at_stage_end() {
        let mut schedule =
            WaveSchedule::new(&[WaveDefinition::new(0.0, "bat", 2, 8.0).repeating(10.0)]);
        assert_eq!(schedule.due(0.0, 25.0).len(), 1);
        assert_eq!(schedule.due(9.0, 25.0).len(), 0);
        // catches up on both missed repeats (10 and 20)
        assert_eq!(schedule.due(24.0, 25.0).len(), 2);
        assert!(schedule.is_exhausted(25.0));
    }
}
