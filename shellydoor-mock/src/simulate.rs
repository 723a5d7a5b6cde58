use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Door position as reported on the device's first input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Open,
    Closed,
    Opening,
    Closing,
}

impl Position {
    pub fn input(self) -> u8 {
        match self {
            Position::Open => 0,
            Position::Closed => 1,
            Position::Opening => 2,
            Position::Closing => 3,
        }
    }

    /// Where a relay pulse sends the door. A moving door reverses.
    fn pulsed(self) -> Position {
        match self {
            Position::Closed | Position::Closing => Position::Opening,
            Position::Open | Position::Opening => Position::Closing,
        }
    }

    fn settled(self) -> Position {
        match self {
            Position::Opening => Position::Open,
            Position::Closing => Position::Closed,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    On,
    Off,
    Toggle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayStatus {
    pub ison: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputStatus {
    pub input: u8,
}

/// Body of `/status`, shaped like a relay board's status document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub relays: Vec<RelayStatus>,
    pub inputs: Vec<InputStatus>,
}

struct Device {
    position: Position,
    ison: bool,
    generation: u64,
    pulses: u64,
}

/// A relay wired to a garage door motor with a position sensor.
#[derive(Clone)]
pub struct GarageSimulator {
    device: Arc<Mutex<Device>>,
    travel_time: Duration,
}

impl GarageSimulator {
    pub fn new(initial: Position, travel_time: Duration) -> Self {
        Self {
            device: Arc::new(Mutex::new(Device {
                position: initial.settled(),
                ison: false,
                generation: 0,
                pulses: 0,
            })),
            travel_time,
        }
    }

    pub async fn position(&self) -> Position {
        self.device.lock().await.position
    }

    /// Number of times the motor was triggered.
    pub async fn pulses(&self) -> u64 {
        self.device.lock().await.pulses
    }

    pub async fn relay(&self) -> RelayStatus {
        RelayStatus {
            ison: self.device.lock().await.ison,
        }
    }

    pub async fn status(&self) -> DeviceStatus {
        let device = self.device.lock().await;

        DeviceStatus {
            relays: vec![RelayStatus { ison: device.ison }],
            inputs: vec![InputStatus {
                input: device.position.input(),
            }],
        }
    }

    /// Switches the relay. `on` and `toggle` pulse the motor, `off` only releases the relay.
    pub async fn switch(&self, turn: Turn) -> RelayStatus {
        let mut device = self.device.lock().await;

        match turn {
            Turn::On => {
                device.ison = true;
                self.pulse(&mut device);
            }
            Turn::Toggle => {
                device.ison = !device.ison;
                self.pulse(&mut device);
            }
            Turn::Off => device.ison = false,
        }

        RelayStatus { ison: device.ison }
    }

    fn pulse(&self, device: &mut Device) {
        let moving = device.position.pulsed();
        device.position = moving;
        device.generation += 1;
        device.pulses += 1;
        tracing::info!("Door is {:?}", moving);

        let generation = device.generation;
        let shared = Arc::clone(&self.device);
        let travel_time = self.travel_time;

        tokio::spawn(async move {
            tokio::time::sleep(travel_time).await;

            let mut device = shared.lock().await;
            if device.generation == generation {
                device.position = moving.settled();
                tracing::info!("Door is {:?}", device.position);
            }
        });
    }
}
