//! Idle-state command handling.

use crate::bot::command::{self, Command};
use crate::bot::dispatcher::BotContext;
use crate::bot::machine::{Resolution, Turn};
use crate::bot::session::DialogState;
use crate::bot::templates;
use crate::domain::DomainError;

pub(crate) async fn handle(
    ctx: &BotContext,
    key: &str,
    text: &str,
) -> Result<Turn, DomainError> {
    let Some(cmd) = command::lookup(text) else {
        // Unmatched text: greet, personalized when the sender is known.
        let reply = match ctx.domain.find_patient_by_phone(key).await? {
            Some(patient) => templates::personalized_welcome(&patient.name),
            None => templates::welcome(),
        };
        return Ok(Turn::new(reply, DialogState::Idle));
    };

    let turn = match cmd {
        Command::Menu => Turn::new(templates::welcome(), DialogState::Idle),
        Command::Help => Turn::new(templates::help(&ctx.admin_phone), DialogState::Idle),
        Command::Register => register(ctx, key).await?,
        Command::DepartmentSchedules => department_schedules(ctx).await?,
        Command::DoctorSchedules => doctor_schedules(ctx).await?,
        Command::Reserve => reserve(ctx, key).await?,
        Command::QueueStatus => queue_status(ctx, key).await?,
        Command::CancelReservation => cancel_start(ctx, key).await?,
    };
    Ok(turn.resolved(Resolution::Command(cmd)))
}

async fn register(ctx: &BotContext, key: &str) -> Result<Turn, DomainError> {
    if let Some(patient) = ctx.domain.find_patient_by_phone(key).await? {
        return Ok(Turn::new(
            templates::already_registered(&patient.name, &patient.nik),
            DialogState::Idle,
        ));
    }
    Ok(Turn::new(
        templates::registration_prompt(),
        DialogState::AwaitingRegistration,
    ))
}

async fn department_schedules(ctx: &BotContext) -> Result<Turn, DomainError> {
    let departments = ctx.domain.list_active_departments().await?;
    if departments.is_empty() {
        return Ok(Turn::new(templates::no_departments(), DialogState::Idle));
    }
    Ok(Turn::new(
        templates::department_list(&departments),
        DialogState::AwaitingScheduleSelection { departments },
    ))
}

async fn doctor_schedules(ctx: &BotContext) -> Result<Turn, DomainError> {
    let doctors = ctx.domain.list_doctors().await?;
    if doctors.is_empty() {
        return Ok(Turn::new(templates::no_doctors(), DialogState::Idle));
    }
    Ok(Turn::new(
        templates::doctor_list(&doctors),
        DialogState::AwaitingDoctorScheduleSelection { doctors },
    ))
}

async fn reserve(ctx: &BotContext, key: &str) -> Result<Turn, DomainError> {
    let Some(patient) = ctx.domain.find_patient_by_phone(key).await? else {
        return Ok(Turn::new(
            templates::not_registered_for_reservation(),
            DialogState::Idle,
        ));
    };
    let doctors = ctx.domain.list_doctors().await?;
    if doctors.is_empty() {
        return Ok(Turn::new(
            templates::no_doctors_available(),
            DialogState::Idle,
        ));
    }
    Ok(Turn::new(
        templates::doctor_list(&doctors),
        DialogState::AwaitingDoctorSelection {
            patient_id: patient.id,
            doctors,
        },
    ))
}

async fn queue_status(ctx: &BotContext, key: &str) -> Result<Turn, DomainError> {
    let Some(patient) = ctx.domain.find_patient_by_phone(key).await? else {
        return Ok(Turn::new(templates::not_registered(), DialogState::Idle));
    };
    let active: Vec<_> = ctx
        .domain
        .list_reservations_for_patient(&patient.id)
        .await?
        .into_iter()
        .filter(|r| r.status.is_active())
        .collect();
    if active.is_empty() {
        return Ok(Turn::new(
            templates::no_active_reservations(),
            DialogState::Idle,
        ));
    }
    Ok(Turn::new(
        templates::active_reservations(&active),
        DialogState::Idle,
    ))
}

async fn cancel_start(ctx: &BotContext, key: &str) -> Result<Turn, DomainError> {
    let Some(patient) = ctx.domain.find_patient_by_phone(key).await? else {
        return Ok(Turn::new(templates::not_registered(), DialogState::Idle));
    };
    let cancellable: Vec<_> = ctx
        .domain
        .list_reservations_for_patient(&patient.id)
        .await?
        .into_iter()
        .filter(|r| r.status.is_active())
        .collect();
    if cancellable.is_empty() {
        return Ok(Turn::new(
            templates::no_cancellable_reservations(),
            DialogState::Idle,
        ));
    }
    Ok(Turn::new(
        templates::cancel_prompt(&cancellable),
        DialogState::AwaitingCancelConfirmation {
            reservations: cancellable,
        },
    ))
}
