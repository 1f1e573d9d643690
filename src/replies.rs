//! Reply texts sent to users
//!
//! Every outgoing message is identified by a [`Reply`] variant; the wording
//! lives here and nowhere else.

use crate::state_machine::state::{ConsultFormat, Goal};

const MENU: &str = "Добро пожаловать в DVAG! 👋\n\n\
Я ваш персональный помощник по финансовому планированию.\n\n\
Выберите, что вас интересует.\n\n\
1️⃣ Записаться на консультацию\n\
2️⃣ Частые вопросы\n\
3️⃣ Наши услуги\n\n\
Напишите цифру или ключевое слово";

const DECLINE_ACK: &str = "Благодарю вас за доверие! 🙏\n\n\
Принимайте решение спокойно — мы всегда на связи, когда вы будете готовы. \
Удачи в планировании будущего! 💼\n\n\
Если передумаете — просто напишите 'меню'.";

const ASK_NAME: &str = "Отлично! Как к вам обращаться?";

const ASK_FORMAT: &str = "Как вам удобнее пройти консультацию?\n\n\
1️⃣ Онлайн\n\
2️⃣ Оффлайн\n\n\
Напишите цифру 1 или 2";

const FORMAT_INVALID: &str = "Пожалуйста, выберите 1 (Онлайн) или 2 (Оффлайн)";

const ASK_GOAL: &str = "Какова ваша основная цель?\n\n\
1️⃣ Накопления\n\
2️⃣ Инвестиции\n\
3️⃣ Защита\n\
4️⃣ Кредиты\n\n\
Напишите цифру от 1 до 4";

const GOAL_INVALID: &str = "Пожалуйста, выберите цифру от 1 до 4";

const FAQ: &str = "❓ *Бесплатна ли консультация?*\n\
Да, первая консультация — бесплатная и без обязательств.\n\n\
❓ *Как проходит онлайн-консультация?*\n\
Через Zoom, WhatsApp или телефон. Ссылку пришлём после записи.\n\n\
❓ *Нужны ли документы?*\n\
Нет, на первой встрече мы только обсуждаем цели.\n\n\
❓ *Работаете ли с иностранцами?*\n\
Да, мы консультируем всех, кто живёт в Германии.\n\n\
❓ *DVAG — это банк?*\n\
Нет. DVAG — независимый консультант с доступом к 700+ финансовым продуктам.\n\n\
Чтобы вернуться: напишите 'меню'";

const SERVICES: &str = "💼 *Наши услуги:*\n\n\
💰 *1. Финансовое планирование*\n\
— Бюджет, накопления, цели\n\n\
📈 *2. Инвестиции и пенсия*\n\
— Riester, Rürup, частные пенсионные фонды\n\n\
🛡️ *3. Защита и страхование*\n\
— Жизнь, здоровье, имущество\n\n\
🏦 *4. Кредиты и рефинансирование*\n\
— Подбор ставок, ипотека\n\n\
Все решения — персональные и прозрачные.\n\n\
Напишите 'меню', чтобы вернуться.";

/// Identifies an outgoing message and the values it is rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Menu,
    DeclineAck,
    AskName,
    AskCity {
        name: String,
    },
    AskFormat,
    FormatInvalid,
    AskGoal,
    GoalInvalid,
    Faq,
    Services,
    Confirmation {
        name: String,
        city: String,
        format: ConsultFormat,
        goal: Goal,
    },
}

impl Reply {
    /// Short identifier for logs
    pub fn id(&self) -> &'static str {
        match self {
            Reply::Menu => "menu",
            Reply::DeclineAck => "decline_ack",
            Reply::AskName => "ask_name",
            Reply::AskCity { .. } => "ask_city",
            Reply::AskFormat => "ask_format",
            Reply::FormatInvalid => "format_invalid",
            Reply::AskGoal => "ask_goal",
            Reply::GoalInvalid => "goal_invalid",
            Reply::Faq => "faq",
            Reply::Services => "services",
            Reply::Confirmation { .. } => "confirmation",
        }
    }

    /// Render the message body
    pub fn text(&self) -> String {
        match self {
            Reply::Menu => MENU.to_string(),
            Reply::DeclineAck => DECLINE_ACK.to_string(),
            Reply::AskName => ASK_NAME.to_string(),
            Reply::AskCity { name } => {
                format!("Спасибо, {name}! 👋\n\nВ каком городе вы находитесь?")
            }
            Reply::AskFormat => ASK_FORMAT.to_string(),
            Reply::FormatInvalid => FORMAT_INVALID.to_string(),
            Reply::AskGoal => ASK_GOAL.to_string(),
            Reply::GoalInvalid => GOAL_INVALID.to_string(),
            Reply::Faq => FAQ.to_string(),
            Reply::Services => SERVICES.to_string(),
            Reply::Confirmation {
                name,
                city,
                format,
                goal,
            } => format!(
                "Спасибо, {name}! ✅\n\n\
                 Ваши данные переданы:\n\
                 — Город: {city}\n\
                 — Формат: {format}\n\
                 — Цель: {goal}\n\n\
                 📅 В течение 24 часов с вами свяжется консультант для согласования времени.\n\n\
                 Благодарим за доверие! 💼",
                format = format.label(),
                goal = goal.label(),
            ),
        }
    }
}
