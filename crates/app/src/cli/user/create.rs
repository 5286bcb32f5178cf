use clap::Args;
use unicart_app::{
    auth::PgAuthService,
    domain::users::{
        PgUsersService, UsersService,
        data::NewUser,
        records::UserUuid,
    },
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Unique login name
    #[arg(long)]
    username: String,

    /// Allow the user to call administrator endpoints
    #[arg(long)]
    administrator: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let user = PgUsersService::new(db.clone())
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: args.username,
            is_administrator: args.administrator,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    let issued = PgAuthService::new(db)
        .issue_api_token(user.uuid)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("username: {}", user.username);
    println!("is_administrator: {}", user.is_administrator);
    println!("token_uuid: {}", issued.record.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
