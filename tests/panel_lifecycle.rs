//! Wire-level tests for the panel over `embedded-hal-mock` SPI and GPIO mocks.

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use ssd1681::{BusyStatus, Builder, Config, Dimensions, Interface, Lifecycle, Panel};

type MockInterface = Interface<SpiMock<u8>, PinMock, PinMock, PinMock>;

/// Expected traffic, split per mock
#[derive(Default)]
struct Wire {
    spi: Vec<SpiTransaction<u8>>,
    dc: Vec<PinTransaction>,
    busy: Vec<PinTransaction>,
}

impl Wire {
    fn write(&mut self, level: PinState, bytes: &[u8]) {
        self.dc.push(PinTransaction::set(level));
        self.spi.push(SpiTransaction::transaction_start());
        self.spi.push(SpiTransaction::write_vec(bytes.to_vec()));
        self.spi.push(SpiTransaction::transaction_end());
    }

    fn command(&mut self, command: u8, params: &[u8]) -> &mut Self {
        self.write(PinState::Low, &[command]);
        if !params.is_empty() {
            self.write(PinState::High, params);
        }
        self
    }

    fn busy_reads(&mut self, level: PinState, count: usize) -> &mut Self {
        for _ in 0..count {
            self.busy.push(PinTransaction::get(level));
        }
        self
    }

    fn idle(&mut self) -> &mut Self {
        self.busy_reads(PinState::Low, 1)
    }
}

struct Harness {
    spi: SpiMock<u8>,
    dc: PinMock,
    rst: PinMock,
    busy: PinMock,
}

impl Harness {
    fn new(wire: &Wire, rst: &[PinTransaction]) -> Self {
        Self {
            spi: SpiMock::new(&wire.spi),
            dc: PinMock::new(&wire.dc),
            rst: PinMock::new(rst),
            busy: PinMock::new(&wire.busy),
        }
    }

    fn panel<'a>(&self, config: Config) -> Panel<'a, MockInterface> {
        let interface = Interface::new(
            self.spi.clone(),
            self.dc.clone(),
            Some(self.rst.clone()),
            Some(self.busy.clone()),
        );
        Panel::new(interface, config).unwrap()
    }

    fn done(mut self) {
        self.spi.done();
        self.dc.done();
        self.rst.done();
        self.busy.done();
    }
}

fn config_400x300() -> Config {
    Builder::new()
        .dimensions(Dimensions::new(300, 400).unwrap())
        .build()
        .unwrap()
}

fn reset_pulse() -> [PinTransaction; 3] {
    [
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]
}

fn init_sequence(wire: &mut Wire) {
    wire.command(0x12, &[])
        .idle()
        .command(0x21, &[0x40, 0x00])
        .command(0x3C, &[0x05])
        .command(0x1A, &[0x5A])
        .command(0x22, &[0x91])
        .command(0x20, &[])
        .idle()
        .command(0x11, &[0x03])
        .command(0x44, &[0x00, 0x31])
        .command(0x45, &[0x00, 0x00, 0x2B, 0x01])
        .command(0x4E, &[0x00])
        .command(0x4F, &[0x00, 0x00])
        .idle();
}

#[test]
fn reset_and_initialize_400x300() {
    let mut wire = Wire::default();
    wire.idle();
    init_sequence(&mut wire);

    let harness = Harness::new(&wire, &reset_pulse());
    let mut panel = harness.panel(config_400x300());
    panel.reset(&mut NoopDelay).unwrap();
    panel.initialize(&mut NoopDelay).unwrap();
    assert_eq!(panel.lifecycle(), Lifecycle::Initialized);

    drop(panel);
    harness.done();
}

#[test]
fn draw_then_refresh() {
    let mut wire = Wire::default();
    wire.idle();
    init_sequence(&mut wire);
    wire.idle()
        .command(0x24, &[0x00; 8])
        .idle()
        .command(0x22, &[0xC7])
        .command(0x20, &[]);

    let harness = Harness::new(&wire, &reset_pulse());
    let mut panel = harness.panel(config_400x300());
    panel.reset(&mut NoopDelay).unwrap();
    panel.initialize(&mut NoopDelay).unwrap();

    let mut source = vec![0u8; 8];
    source.extend([0xFF; 8]);
    panel.draw(0, 0, 8, 8, &source, &mut NoopDelay).unwrap();
    // Refresh returns without reading the busy line
    panel.refresh().unwrap();

    drop(panel);
    harness.done();
}

#[test]
fn stuck_busy_line_does_not_block_reset() {
    let mut wire = Wire::default();
    wire.busy_reads(PinState::High, 3);

    let config = Builder::new()
        .dimensions(Dimensions::new(300, 400).unwrap())
        .reset_active_high(true)
        .busy_polling(1, 3)
        .build()
        .unwrap();
    let rst = [
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
    ];

    let harness = Harness::new(&wire, &rst);
    let mut panel = harness.panel(config);
    panel.reset(&mut NoopDelay).unwrap();
    assert_eq!(panel.lifecycle(), Lifecycle::Reset);

    drop(panel);
    harness.done();
}

#[test]
fn wait_until_idle_reports_timeout() {
    let mut wire = Wire::default();
    wire.busy_reads(PinState::High, 2).busy_reads(PinState::Low, 1);

    let config = Builder::new()
        .dimensions(Dimensions::new(300, 400).unwrap())
        .busy_polling(5, 2)
        .build()
        .unwrap();

    let harness = Harness::new(&wire, &[]);
    let mut panel = harness.panel(config);
    assert_eq!(
        panel.wait_until_idle(&mut NoopDelay).unwrap(),
        BusyStatus::TimedOut
    );
    assert_eq!(
        panel.wait_until_idle(&mut NoopDelay).unwrap(),
        BusyStatus::Idle
    );

    drop(panel);
    harness.done();
}
