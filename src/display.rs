//! ST7789 display driver: 320×170 LCD over SPI with DMA.

use core::fmt;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::Spi,
    time::Rate,
};

use crate::DisplayResources;

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The badge's ST7789 display, ready to draw on with `embedded-graphics`.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::ST7789, Output<'a>>;

/// Only whole cells and glyph rows are ever sent, so small DMA chunks do.
const DMA_BYTES: usize = 4096;
const PIXEL_BUFFER_BYTES: usize = 4096;

/// Which step of bringing up the panel failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, defmt::Format)]
pub enum DisplayInitError {
    DmaBuffer,
    SpiConfig,
    ChipSelect,
    Panel,
}

impl fmt::Display for DisplayInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DmaBuffer => f.write_str("DMA buffer setup failed"),
            Self::SpiConfig => f.write_str("SPI configuration rejected"),
            Self::ChipSelect => f.write_str("chip select pin unusable"),
            Self::Panel => f.write_str("ST7789 did not initialise"),
        }
    }
}

/// Brings up the SPI bus and the panel, landscape, colors inverted.
pub fn open(res: DisplayResources<'static>) -> Result<Display<'static>, DisplayInitError> {
    let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(DMA_BYTES);
    let dma_rx_buf =
        DmaRxBuf::new(rx_descriptors, rx_buffer).map_err(|_| DisplayInitError::DmaBuffer)?;
    let dma_tx_buf =
        DmaTxBuf::new(tx_descriptors, tx_buffer).map_err(|_| DisplayInitError::DmaBuffer)?;

    let mut delay = esp_hal::delay::Delay::new();

    let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
    let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
    rst.set_high();

    let spi = Spi::new(
        res.spi,
        esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
    )
    .map_err(|_| DisplayInitError::SpiConfig)?
    .with_sck(res.sck)
    .with_mosi(res.mosi)
    .with_miso(res.miso)
    .with_dma(res.dma)
    .with_buffers(dma_rx_buf, dma_tx_buf)
    .into_async();

    let cs = Output::new(res.cs, Level::High, OutputConfig::default());
    let spi_device =
        ExclusiveDevice::new(spi, cs, delay).map_err(|_| DisplayInitError::ChipSelect)?;

    let buffer = crate::mk_static!([u8; PIXEL_BUFFER_BYTES], [0_u8; PIXEL_BUFFER_BYTES]);
    let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

    let display = mipidsi::Builder::new(mipidsi::models::ST7789, di)
        .reset_pin(rst)
        .display_size(170, 320)
        .invert_colors(mipidsi::options::ColorInversion::Inverted)
        .orientation(mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90))
        .display_offset(35, 0)
        .init(&mut delay)
        .map_err(|_| DisplayInitError::Panel)?;

    info!("display ready");
    Ok(display)
}

/// The display, movable to the other core.
///
/// The driver keeps raw DMA descriptor pointers and so is not `Send`. The
/// firmware only ever reaches it through one mutex, which serialises the
/// two cores.
pub struct Panel(Display<'static>);

// SAFETY: see the type docs; every access is behind a single lock.
unsafe impl Send for Panel {}

impl Panel {
    pub const fn new(display: Display<'static>) -> Self {
        Self(display)
    }
}

impl OriginDimensions for Panel {
    fn size(&self) -> Size {
        self.0.bounding_box().size
    }
}

impl DrawTarget for Panel {
    type Color = Rgb565;
    type Error = <Display<'static> as DrawTarget>::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.0.fill_contiguous(area, colors)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.0.fill_solid(area, color)
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.0.clear(color)
    }
}
