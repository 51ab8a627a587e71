//! Runtime shell entry point.
//!
//! On the LiteX SoC (`riscv32`): interrupt setup, then the console loop.
//! Anywhere else: the same shell on stdin/stdout, log records on stderr.

#![cfg_attr(target_arch = "riscv32", no_std)]
#![cfg_attr(target_arch = "riscv32", no_main)]

#[cfg(target_arch = "riscv32")]
mod firmware {
    use core::panic::PanicInfo;

    use litex_runtime_shell::config::CsrMap;
    use litex_runtime_shell::hal::LitexBoard;
    use litex_runtime_shell::{LogStream, Shell, SineOracle, CONFIG};
    use riscv_rt::entry;

    #[entry]
    fn main() -> ! {
        if cfg!(feature = "irq") {
            // SAFETY: first thing after reset, nothing depends on interrupt state yet
            unsafe { litex_runtime_shell::hal::litex::irq_init() };
        }

        let log: LogStream = LogStream::new();
        let config = CONFIG.with_echo_log(cfg!(feature = "log-echo"));
        let board = LitexBoard::new(CsrMap::DEFAULT);
        let mut shell = Shell::new(board, SineOracle::new(), config, &log);
        shell.run()
    }

    #[panic_handler]
    fn panic(_info: &PanicInfo) -> ! {
        loop {
            core::hint::spin_loop();
        }
    }
}

#[cfg(not(target_arch = "riscv32"))]
mod host;

#[cfg(not(target_arch = "riscv32"))]
fn main() {
    host::run();
}
