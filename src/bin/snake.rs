//! Snake, dual-core.
//!
//! Core 0: logic task (input, movement, board) and tone task (vibration).
//! Core 1: overlay task (title, HUD, game over, blinking prompt).
//! Both draw through one display mutex and meet at the shared phase.

#![cfg_attr(target_arch = "xtensa", no_std, no_main)]

#[cfg(target_arch = "xtensa")]
esp_bootloader_esp_idf::esp_app_desc!();

#[cfg(target_arch = "xtensa")]
#[esp_rtos::main]
async fn main(spawner: embassy_executor::Spawner) -> ! {
    firmware::run(spawner).await
}

/// Host builds only carry the library and its tests.
#[cfg(not(target_arch = "xtensa"))]
fn main() {}

#[cfg(target_arch = "xtensa")]
mod firmware {
    use defmt::info;
    use embassy_executor::Spawner;
    use embassy_sync::{
        blocking_mutex::raw::CriticalSectionRawMutex,
        channel::Channel,
        mutex::Mutex,
    };
    use embassy_time::{
        Delay,
        Duration,
        Timer,
    };
    use esp_backtrace as _;
    use esp_hal::{
        interrupt::software::SoftwareInterruptControl,
        system::Stack,
        timer::timg::TimerGroup,
    };
    use esp_println as _;
    use rand::{
        SeedableRng,
        rngs::SmallRng,
    };
    #[allow(clippy::wildcard_imports)]
    use snake_badge::*;
    use snake_badge::{
        config::{
            GRID_HEIGHT,
            GRID_WIDTH,
            MAX_SNAKE_LENGTH,
        },
        game::Game,
        grid::Grid,
        logic::LogicTask,
        overlay::OverlayTask,
        screen::GraphicsScreen,
        sound::{
            self,
            SoundQueue,
        },
        state::SharedState,
    };

    const CORE1_STACK: usize = 8192;

    type ScreenLock = Mutex<CriticalSectionRawMutex, GraphicsScreen<Panel>>;

    static SHARED: SharedState = SharedState::new();
    static SOUNDS: SoundQueue<CriticalSectionRawMutex> = Channel::new();

    #[embassy_executor::task]
    async fn logic_task(screen: &'static ScreenLock, buttons: &'static Buttons, seed: u64) {
        let grid = Grid::new(GRID_WIDTH, GRID_HEIGHT);
        let game: Game<SmallRng, MAX_SNAKE_LENGTH> =
            match Game::new(grid, SmallRng::seed_from_u64(seed)) {
                Ok(game) => game,
                Err(err) => panic!("cannot place the snake: {}", err),
            };

        let mut task = LogicTask::new(&SHARED, screen, &SOUNDS, buttons, Delay, game);
        let Err(_) = task.run().await;
        panic!("display write failed in the logic task");
    }

    #[embassy_executor::task]
    async fn overlay_task(screen: &'static ScreenLock) {
        let mut task = OverlayTask::new(&SHARED, screen, Delay);
        let Err(_) = task.run().await;
        panic!("display write failed in the overlay task");
    }

    #[embassy_executor::task]
    async fn tone_task(vibra: &'static mut Vibration) {
        match sound::run_tones(&SOUNDS, vibra).await {}
    }

    pub async fn run(spawner: Spawner) -> ! {
        let peripherals = snake_badge::init();
        let resources = split_resources!(peripherals);

        esp_alloc::heap_allocator!(size: 64 * 1024);

        let timg0 = TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);

        let seed = u64::from(esp_hal::rng::Rng::new().random());

        let display = match display::open(resources.display) {
            Ok(display) => display,
            Err(err) => panic!("{}", err),
        };
        let screen = mk_static!(ScreenLock, Mutex::new(GraphicsScreen::new(Panel::new(display))));
        let backlight = mk_static!(Backlight, resources.backlight.into());
        let buttons = mk_static!(Buttons, resources.buttons.into());
        let vibra = mk_static!(Vibration, resources.vibra.into());

        // Core 1 only runs the overlay.
        let sw_ints = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
        let core1_stack = mk_static!(Stack<CORE1_STACK>, Stack::new());

        esp_rtos::start_second_core::<CORE1_STACK>(
            peripherals.CPU_CTRL,
            sw_ints.software_interrupt0,
            sw_ints.software_interrupt1,
            core1_stack,
            move || {
                let executor = mk_static!(
                    esp_rtos::embassy::Executor,
                    esp_rtos::embassy::Executor::new()
                );
                executor.run(|spawner| {
                    spawner.must_spawn(overlay_task(screen));
                });
            },
        );

        spawner.must_spawn(logic_task(screen, buttons, seed));
        spawner.must_spawn(tone_task(vibra));
        backlight.on();
        info!("snake running, seed {}", seed);

        loop {
            Timer::after(Duration::from_secs(600)).await;
        }
    }
}
