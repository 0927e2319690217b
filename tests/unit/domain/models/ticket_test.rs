// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use ispdesk::domain::errors::DomainError;
use ispdesk::domain::models::ticket::{NewTicket, Ticket, TicketStatus, UnreadUpdate};
use uuid::Uuid;

fn pending_ticket() -> Ticket {
    Ticket::new(NewTicket {
        company_id: Uuid::new_v4(),
        contact_id: Uuid::new_v4(),
        ..Default::default()
    })
}

fn closed_ticket(queue_id: Option<Uuid>) -> Ticket {
    let mut ticket = Ticket::new(NewTicket {
        company_id: Uuid::new_v4(),
        contact_id: Uuid::new_v4(),
        queue_id,
        user_id: Some(Uuid::new_v4()),
        ..Default::default()
    });
    let transition = ticket.resolve(Utc::now()).unwrap();
    ticket.apply(&transition, Utc::now());
    ticket
}

#[test]
fn test_initial_status() {
    assert_eq!(Ticket::initial_status(None, None), TicketStatus::Pending);
    assert_eq!(
        Ticket::initial_status(Some(Uuid::new_v4()), None),
        TicketStatus::Open
    );
    assert_eq!(
        Ticket::initial_status(None, Some(Uuid::new_v4())),
        TicketStatus::Open
    );

    let ticket = pending_ticket();
    assert_eq!(ticket.status, TicketStatus::Pending);
    assert_eq!(ticket.unread_messages, 0);
    assert!(ticket.closed_at.is_none());
}

#[test]
fn test_transfer_to_queue_returns_ticket_to_pool() {
    let queue_id = Uuid::new_v4();
    let mut ticket = pending_ticket();
    let assign = ticket.assign_to(Uuid::new_v4()).unwrap();
    ticket.apply(&assign, Utc::now());
    ticket.unread_messages = 4;

    let transition = ticket.transfer_to_queue(queue_id).unwrap();
    assert_eq!(transition.kind, "transfer_queue");
    assert_eq!(transition.from, ticket.routing());
    assert_eq!(transition.unread, UnreadUpdate::Keep);

    ticket.apply(&transition, Utc::now());
    assert_eq!(ticket.status, TicketStatus::Pending);
    assert_eq!(ticket.queue_id, Some(queue_id));
    assert!(ticket.user_id.is_none());
    assert_eq!(ticket.unread_messages, 4);
}

#[test]
fn test_assign_keeps_queue() {
    let queue_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();
    let mut ticket = pending_ticket();
    let to_queue = ticket.transfer_to_queue(queue_id).unwrap();
    ticket.apply(&to_queue, Utc::now());

    let transition = ticket.assign_to(user_id).unwrap();
    assert_eq!(transition.kind, "assign");
    ticket.apply(&transition, Utc::now());

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.queue_id, Some(queue_id));
    assert_eq!(ticket.user_id, Some(user_id));
}

#[test]
fn test_resolve_stops_automation() {
    let mut ticket = pending_ticket();
    ticket.unread_messages = 3;
    ticket.typebot_status = true;
    let now = Utc::now();

    let transition = ticket.resolve(now).unwrap();
    assert_eq!(transition.to.status, TicketStatus::Closed);
    assert_eq!(transition.unread, UnreadUpdate::Reset);
    assert_eq!(transition.closed_at, Some(now));
    assert!(transition.stop_automation);

    ticket.apply(&transition, now);
    assert!(ticket.is_closed());
    assert_eq!(ticket.unread_messages, 0);
    assert_eq!(ticket.closed_at, Some(now));
    assert!(ticket.flow_stopped);
    assert!(!ticket.typebot_status);
}

#[test]
fn test_closed_ticket_rejects_agent_actions() {
    let ticket = closed_ticket(None);

    let err = ticket.transfer_to_queue(Uuid::new_v4()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidTransition {
            from: TicketStatus::Closed,
            action: "transfer"
        }
    ));
    assert!(ticket.assign_to(Uuid::new_v4()).is_err());
    assert!(matches!(
        ticket.resolve(Utc::now()),
        Err(DomainError::InvalidTransition { action: "resolve", .. })
    ));
}

#[test]
fn test_inbound_reopens_closed_ticket() {
    let queue_id = Uuid::new_v4();
    let mut ticket = closed_ticket(Some(queue_id));

    let transition = ticket.receive_inbound();
    assert_eq!(transition.kind, "reopen");
    ticket.apply(&transition, Utc::now());

    assert_eq!(ticket.status, TicketStatus::Pending);
    assert_eq!(ticket.queue_id, Some(queue_id));
    assert!(ticket.user_id.is_none());
    assert_eq!(ticket.unread_messages, 1);
}

#[test]
fn test_inbound_on_open_ticket_only_counts_unread() {
    let user_id = Uuid::new_v4();
    let mut ticket = pending_ticket();
    let assign = ticket.assign_to(user_id).unwrap();
    ticket.apply(&assign, Utc::now());

    let transition = ticket.receive_inbound();
    assert_eq!(transition.kind, "inbound");
    assert_eq!(transition.to, transition.from);
    ticket.apply(&transition, Utc::now());
    let again = ticket.receive_inbound();
    ticket.apply(&again, Utc::now());

    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.user_id, Some(user_id));
    assert_eq!(ticket.unread_messages, 2);
}

#[test]
fn test_mark_read_resets_unread() {
    let mut ticket = pending_ticket();
    ticket.unread_messages = 7;

    let transition = ticket.mark_read();
    assert_eq!(transition.kind, "read");
    assert_eq!(transition.to, ticket.routing());
    ticket.apply(&transition, Utc::now());

    assert_eq!(ticket.unread_messages, 0);
    assert_eq!(ticket.status, TicketStatus::Pending);
}
