mod job_schedulers;
mod reminder;
mod session;
mod shared;
mod status;

use actix_web::{dev::Server, middleware, web, App, HttpServer};
use huddle_infra::HuddleContext;
use job_schedulers::{start_send_reminders_job, start_session_cleanup_job};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

// The reminder lifecycle hooks are the only interface exposed to the
// meeting management component
pub use reminder::sync_meeting_reminders::{
    SyncMeetingRemindersTrigger, SyncMeetingRemindersUseCase,
};
pub use shared::usecase::{execute, UseCase};

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: HuddleContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: HuddleContext) {
        start_send_reminders_job(context.clone());
        start_session_cleanup_job(context);
    }

    async fn configure_server(context: HuddleContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
