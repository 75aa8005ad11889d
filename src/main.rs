use actix_web::{middleware, web, App, HttpResponse, HttpServer, Responder};
use clap::{Parser, Subcommand};
use lightcycle_bot::arena::Arena;
use lightcycle_bot::connection::TcpConnection;
use lightcycle_bot::driver::Bot;
use lightcycle_bot::error::EngineError;
use lightcycle_bot::protocol::{message_to_state, BotInfo, MoveResponse, StateMessage};
use log::{error, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Mutex;

#[derive(Parser, Debug)]
#[command(version, about = "Light-cycle bot")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join a game server over TCP and play until the session ends
    Connect {
        name: String,
        #[arg(long, default_value = "127.0.0.1:9000")]
        address: String,
    },
    /// Answer moves over HTTP
    Serve {
        name: String,
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: String,
    },
    /// Play a local match between bots
    Simulate {
        #[arg(long, default_value_t = 20)]
        width: i32,
        #[arg(long, default_value_t = 20)]
        height: i32,
        #[arg(long, default_value_t = 2)]
        bots: usize,
        #[arg(long, default_value_t = 0)]
        wanderers: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 10_000)]
        max_frames: u64,
    },
}

async fn bot_info(bot: web::Data<Mutex<Bot>>) -> impl Responder {
    let name = match bot.lock() {
        Ok(b) => b.name().to_string(),
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    HttpResponse::Ok().json(BotInfo {
        name,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn get_move(bot: web::Data<Mutex<Bot>>, state: web::Json<StateMessage>) -> impl Responder {
    let state = match message_to_state(state.into_inner()) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
    };

    let mut bot = match bot.lock() {
        Ok(b) => b,
        Err(_) => return HttpResponse::InternalServerError().finish(),
    };

    match bot.tick(&state) {
        Ok(direction) => HttpResponse::Ok().json(MoveResponse {
            r#move: direction,
            previous: bot.previous_code(),
        }),
        Err(e @ EngineError::PlayerNotFound(_)) => {
            HttpResponse::UnprocessableEntity().body(e.to_string())
        }
        Err(e) => HttpResponse::BadRequest().body(e.to_string()),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/move", web::post().to(get_move))
        .route("/", web::get().to(bot_info));
}

async fn serve(name: String, bind: String) -> std::io::Result<()> {
    let bot = web::Data::new(Mutex::new(Bot::create(name)));
    info!("listening on {}", bind);

    HttpServer::new(move || {
        App::new()
            .app_data(bot.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}

fn connect(name: String, address: String) {
    let mut conn = match TcpConnection::connect(&address, &name) {
        Ok(c) => c,
        Err(e) => {
            error!("{}: connection failed: {}", name, e);
            std::process::exit(1);
        }
    };

    let mut bot = Bot::create(name);
    if let Err(e) = bot.run(&mut conn) {
        error!("{}: {}", bot.name(), e);
        std::process::exit(1);
    }
}

fn simulate(width: i32, height: i32, bots: usize, wanderers: usize, seed: u64, max_frames: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let names: Vec<String> = (0..bots)
        .map(|i| format!("bot{}", i))
        .chain((0..wanderers).map(|i| format!("wanderer{}", i)))
        .collect();

    let mut arena = Arena::create(width, height, &names, &mut rng);
    let mut players: Vec<Bot> = names.iter().take(bots).map(|n| Bot::create(n.as_str())).collect();
    let outcome = arena.play(&mut players, &mut rng, max_frames);

    arena.grid.print();
    println!("frames: {}", outcome.frames);
    println!("survivors: {:?}", outcome.survivors);
}

fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    match Cli::parse().command {
        Command::Connect { name, address } => connect(name, address),
        Command::Serve { name, bind } => {
            actix_web::rt::System::new().block_on(serve(name, bind))?
        }
        Command::Simulate {
            width,
            height,
            bots,
            wanderers,
            seed,
            max_frames,
        } => simulate(width, height, bots, wanderers, seed, max_frames),
    }

    Ok(())
}
