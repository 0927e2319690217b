// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::repositories::company_repository::CompanyRepository;
use crate::domain::repositories::connection_repository::ConnectionRepository;
use crate::domain::repositories::contact_repository::ContactRepository;
use crate::domain::repositories::invoice_repository::InvoiceRepository;
use crate::domain::repositories::message_repository::MessageRepository;
use crate::domain::repositories::plan_repository::PlanRepository;
use crate::domain::repositories::queue_repository::QueueRepository;
use crate::domain::repositories::schedule_repository::ScheduleRepository;
use crate::domain::repositories::setting_repository::SettingRepository;
use crate::domain::repositories::ticket_repository::TicketRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::ai_service::AiProvider;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::billing_service::BillingService;
use crate::domain::services::channel_service::ChannelService;
use crate::domain::services::company_service::CompanyService;
use crate::domain::services::connection_service::ConnectionService;
use crate::domain::services::contact_service::ContactService;
use crate::domain::services::message_service::MessageService;
use crate::domain::services::password_service::PasswordService;
use crate::domain::services::payment_gateway::PaymentGateway;
use crate::domain::services::plan_service::PlanService;
use crate::domain::services::queue_service::QueueService;
use crate::domain::services::schedule_service::ScheduleService;
use crate::domain::services::settings_store::SettingsStore;
use crate::domain::services::ticket_service::TicketService;
use crate::domain::services::user_service::UserService;
use crate::domain::use_cases::handle_inbound_message::HandleInboundMessage;
use crate::infrastructure::repositories::company_repo_impl::CompanyRepositoryImpl;
use crate::infrastructure::repositories::connection_repo_impl::ConnectionRepositoryImpl;
use crate::infrastructure::repositories::contact_repo_impl::ContactRepositoryImpl;
use crate::infrastructure::repositories::invoice_repo_impl::InvoiceRepositoryImpl;
use crate::infrastructure::repositories::message_repo_impl::MessageRepositoryImpl;
use crate::infrastructure::repositories::plan_repo_impl::PlanRepositoryImpl;
use crate::infrastructure::repositories::queue_repo_impl::QueueRepositoryImpl;
use crate::infrastructure::repositories::schedule_repo_impl::ScheduleRepositoryImpl;
use crate::infrastructure::repositories::setting_repo_impl::SettingRepositoryImpl;
use crate::infrastructure::repositories::ticket_repo_impl::TicketRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::infrastructure::services::ai_service_impl::OpenAiProvider;
use crate::infrastructure::services::channel_service_impl::HttpChannelService;
use crate::infrastructure::services::payment_gateway_impl::HttpPaymentGateway;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// 外部协作方
///
/// 生产环境使用 HTTP 实现，测试中替换为内存实现
#[derive(Clone)]
pub struct Collaborators {
    pub channel: Arc<dyn ChannelService>,
    pub ai: Arc<dyn AiProvider>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl Collaborators {
    /// 按配置创建 HTTP 客户端
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            channel: Arc::new(HttpChannelService::new(
                settings.channel.gateway_url.clone(),
                settings.channel.secret.clone(),
                settings.channel.timeout_secs,
            )),
            ai: Arc::new(OpenAiProvider::new(
                settings.ai.api_key.clone(),
                settings.ai.model.clone(),
                settings.ai.api_base_url.clone(),
                settings.ai.timeout_secs,
            )),
            payments: Arc::new(HttpPaymentGateway::new(
                settings.billing.checkout_url.clone(),
                settings.billing.webhook_secret.clone(),
            )),
        }
    }
}

/// 应用上下文
///
/// 持有所有领域服务，由 `main` 和测试共同使用，
/// 路由层通过 `Extension` 把服务注入到处理器
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub queues: Arc<QueueService>,
    pub contacts: Arc<ContactService>,
    pub connections: Arc<ConnectionService>,
    pub tickets: Arc<TicketService>,
    pub messages: Arc<MessageService>,
    pub plans: Arc<PlanService>,
    pub companies: Arc<CompanyService>,
    pub settings_store: Arc<SettingsStore>,
    pub billing: Arc<BillingService>,
    pub schedules: Arc<ScheduleService>,
    pub inbound: Arc<HandleInboundMessage>,
}

impl AppContext {
    /// 组装仓库和服务
    ///
    /// # 错误
    /// * 当密码哈希参数无效时返回错误
    pub fn new(
        db: Arc<DatabaseConnection>,
        settings: Arc<Settings>,
        collaborators: Collaborators,
    ) -> anyhow::Result<Self> {
        let plan_repo: Arc<dyn PlanRepository> = Arc::new(PlanRepositoryImpl::new(db.clone()));
        let company_repo: Arc<dyn CompanyRepository> =
            Arc::new(CompanyRepositoryImpl::new(db.clone()));
        let user_repo: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(db.clone()));
        let queue_repo: Arc<dyn QueueRepository> = Arc::new(QueueRepositoryImpl::new(db.clone()));
        let contact_repo: Arc<dyn ContactRepository> =
            Arc::new(ContactRepositoryImpl::new(db.clone()));
        let connection_repo: Arc<dyn ConnectionRepository> =
            Arc::new(ConnectionRepositoryImpl::new(db.clone()));
        let ticket_repo: Arc<dyn TicketRepository> =
            Arc::new(TicketRepositoryImpl::new(db.clone()));
        let message_repo: Arc<dyn MessageRepository> =
            Arc::new(MessageRepositoryImpl::new(db.clone()));
        let setting_repo: Arc<dyn SettingRepository> =
            Arc::new(SettingRepositoryImpl::new(db.clone()));
        let invoice_repo: Arc<dyn InvoiceRepository> =
            Arc::new(InvoiceRepositoryImpl::new(db.clone()));
        let schedule_repo: Arc<dyn ScheduleRepository> =
            Arc::new(ScheduleRepositoryImpl::new(db));

        let passwords = PasswordService::new(
            settings.auth.hash_memory_kib,
            settings.auth.hash_iterations,
            settings.auth.hash_parallelism,
        )?;

        let plans = Arc::new(PlanService::new(
            plan_repo.clone(),
            company_repo.clone(),
            user_repo.clone(),
            queue_repo.clone(),
            connection_repo.clone(),
        ));
        let auth = Arc::new(AuthService::new(
            user_repo.clone(),
            company_repo.clone(),
            passwords.clone(),
            settings.auth.jwt_secret.clone(),
            settings.auth.token_ttl_hours,
        ));
        let users = Arc::new(UserService::new(
            user_repo.clone(),
            queue_repo.clone(),
            plans.clone(),
            passwords.clone(),
        ));
        let companies = Arc::new(CompanyService::new(
            company_repo.clone(),
            plan_repo.clone(),
            user_repo.clone(),
            passwords,
        ));
        let queues = Arc::new(QueueService::new(
            queue_repo.clone(),
            ticket_repo.clone(),
            user_repo,
            plans.clone(),
        ));
        let contacts = Arc::new(ContactService::new(contact_repo.clone()));
        let connections = Arc::new(ConnectionService::new(connection_repo.clone(), plans.clone()));
        let messages = Arc::new(MessageService::new(
            message_repo,
            ticket_repo.clone(),
            contact_repo.clone(),
            collaborators.channel,
        ));
        let tickets = Arc::new(TicketService::new(
            ticket_repo.clone(),
            contact_repo,
            connection_repo.clone(),
            queue_repo,
            messages.clone(),
            plans.clone(),
        ));
        let settings_store = Arc::new(SettingsStore::new(setting_repo));
        let billing = Arc::new(BillingService::new(
            invoice_repo,
            company_repo,
            plan_repo,
            collaborators.payments,
            settings.billing.renewal_days,
            settings.billing.grace_days,
        ));
        let schedules = Arc::new(ScheduleService::new(
            schedule_repo,
            ticket_repo.clone(),
            messages.clone(),
            plans.clone(),
        ));
        let inbound = Arc::new(HandleInboundMessage::new(
            connection_repo,
            ticket_repo,
            contacts.clone(),
            tickets.clone(),
            messages.clone(),
            settings_store.clone(),
            plans.clone(),
            collaborators.ai,
        ));

        Ok(Self {
            settings,
            auth,
            users,
            queues,
            contacts,
            connections,
            tickets,
            messages,
            plans,
            companies,
            settings_store,
            billing,
            schedules,
            inbound,
        })
    }
}
