//! Startup provisioning of the first admin account.

use egram_core::accounts::SignUpInput;
use egram_core::roles::Role;
use egram_core::types::DbId;
use egram_db::models::profile::CreateProfile;
use egram_db::repositories::ProfileRepo;
use egram_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::BootstrapAdmin;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminBootstrap {
    Created(DbId),
    /// An existing profile with that email was given the admin role.
    Promoted(DbId),
    AlreadyAdmin(DbId),
}

/// Make sure an admin with the configured email exists.
///
/// The password of an existing profile is left unchanged.
pub async fn ensure_admin(pool: &DbPool, admin: &BootstrapAdmin) -> AppResult<AdminBootstrap> {
    let input = SignUpInput {
        name: admin.name.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
    }
    .normalized()?;

    if let Some(existing) = ProfileRepo::find_by_email(pool, &input.email).await? {
        if existing.role() == Role::Admin {
            return Ok(AdminBootstrap::AlreadyAdmin(existing.id));
        }
        ProfileRepo::set_role(pool, existing.id, Role::Admin).await?;
        return Ok(AdminBootstrap::Promoted(existing.id));
    }

    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role: Role::Admin,
        },
    )
    .await?;
    Ok(AdminBootstrap::Created(profile.id))
}
