use clap::Parser;
use tokio::signal;

use crate::{cli::notifications::NotificationArgs, prelude::*};

#[derive(Parser)]
pub struct RemindArgs {
    #[clap(flatten)]
    notifications: NotificationArgs,
}

impl RemindArgs {
    pub async fn run(self) -> Result {
        let notifier = self.notifications.notifier()?;
        ensure!(notifier.request_permission().await, "notifications are not permitted");
        notifier.configure().await?;
        notifier.schedule_daily_reminder().await;

        signal::ctrl_c().await?;
        info!("interrupted");
        notifier.cancel_all().await;
        Ok(())
    }
}
