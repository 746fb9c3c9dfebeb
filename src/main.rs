use std::io;
use std::process;
use log::{error, info};
use tinysh::config::ConfigLoader;
use tinysh::environment::Environment;
use tinysh::executor::DefaultExecutor;
use tinysh::io::stdin_is_terminal;
use tinysh::logging;
use tinysh::prompt::ShellPrompt;
use tinysh::repl::Repl;

fn main() {
    let config = ConfigLoader::load_default();
    if let Err(e) = logging::init(&config) {
        eprintln!("tinysh: cannot open log file: {}", e);
    }
    info!("starting with {:?}", config);

    let mut env = Environment::new();
    for (name, value) in &config.env_vars {
        env.set(name, value);
    }

    let interactive = stdin_is_terminal();
    let mut repl = Repl::new(DefaultExecutor::new(), env, ShellPrompt::new(config.prompt));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let code = match repl.run(stdin.lock(), &mut stdout, interactive) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("tinysh: {}", e);
            1
        }
    };
    process::exit(code);
}
