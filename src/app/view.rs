use super::messages::{Message, ToolButton};
use super::state::{
    App, AVATAR_SIZE, BUBBLE_MAX_TEXT_WIDTH, BUBBLE_VERTICAL_PADDING, DRAFT_INPUT_ID,
    HEADER_HEIGHT, INPUT_BAR_HEIGHT, LIST_SCROLL_ID, MESSAGE_SPACING, PHOTO_PREVIEW_HEIGHT,
    PROGRESS_HANDLE_SIZE, PROGRESS_TRACK_HEIGHT, PROGRESS_TRACK_WIDTH, PlayerLifecycle,
    TIMESTAMP_ROW_HEIGHT,
};
use crate::transcript::{AudioAttachment, CardLayout, ChatMessage, MessageBody, Sender, needs_timestamp};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Column, Space, button, column, container, horizontal_space, image, mouse_area, opaque, row,
    scrollable, stack, text, text_input,
};
use iced::{Background, Element, Length, Padding, Theme, border};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let mut chrome = column![self.header(), self.message_list(), self.input_bar()];
        if self.layout.input_focused {
            chrome = chrome.push(self.keyboard_panel());
        }

        let mut layers = stack![chrome.width(Length::Fill).height(Length::Fill)];
        if !self.ui.toasts.is_empty() {
            layers = layers.push(self.toast_layer());
        }
        if let Some(index) = self.ui.lightbox {
            layers = layers.push(self.lightbox_layer(index));
        }

        layers.width(Length::Fill).height(Length::Fill).into()
    }

    fn header(&self) -> Element<'_, Message> {
        let theme_label = if matches!(self.config.theme, crate::config::ThemeMode::Night) {
            "Day"
        } else {
            "Night"
        };

        container(
            row![
                text(self.config.peer_name.as_str()).size(18),
                horizontal_space(),
                button(theme_label).on_press(Message::ToggleTheme),
            ]
            .spacing(10)
            .align_y(Vertical::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(HEADER_HEIGHT))
        .padding([0, 16])
        .align_y(Vertical::Center)
        .style(header_style)
        .into()
    }

    fn message_list(&self) -> Element<'_, Message> {
        let mut list = Column::new().spacing(MESSAGE_SPACING).padding(Padding {
            top: 12.0,
            right: 12.0,
            bottom: self.layout.frame.bottom_padding,
            left: 12.0,
        });

        let mut previous = None;
        for (index, message) in self.conversation.messages.iter().enumerate() {
            if needs_timestamp(previous, message.sent_at, self.config.timestamp_gap_minutes) {
                list = list.push(timestamp_row(message));
            }
            previous = Some(message.sent_at);
            list = list.push(self.message_row(index, message));
        }

        let list = scrollable(list.width(Length::Fill))
            .id(LIST_SCROLL_ID.clone())
            .on_scroll(|viewport| Message::Scrolled {
                offset: viewport.relative_offset(),
                viewport_height: viewport.bounds().height,
                content_height: viewport.content_bounds().height,
            })
            .width(Length::Fill)
            .height(Length::Fixed(self.layout.frame.list_height));

        // Tapping the conversation background dismisses the keyboard.
        mouse_area(list).on_press(Message::InputBlurred).into()
    }

    fn message_row<'a>(&'a self, index: usize, message: &'a ChatMessage) -> Element<'a, Message> {
        let body: Element<'a, Message> = match &message.body {
            MessageBody::Text(body) => self.bubble(message.sender, body),
            MessageBody::Photo { caption, .. } => self.photo_message(index, caption.as_deref()),
            MessageBody::Audio(attachment) => self.audio_card(index, attachment),
        };

        let avatar = self.avatar(message.sender);
        let content = match message.sender {
            Sender::Peer => row![avatar, body, horizontal_space()],
            Sender::Me => row![horizontal_space(), body, avatar],
        };
        content.spacing(8).width(Length::Fill).into()
    }

    fn bubble<'a>(&self, sender: Sender, body: &'a str) -> Element<'a, Message> {
        let mine = sender == Sender::Me;
        container(text(body).size(self.config.font_size))
            .padding([BUBBLE_VERTICAL_PADDING, 12.0])
            .max_width(BUBBLE_MAX_TEXT_WIDTH + 24.0)
            .style(move |theme| bubble_style(theme, mine))
            .into()
    }

    fn avatar(&self, sender: Sender) -> Element<'_, Message> {
        let handle = match sender {
            Sender::Me => &self.own_avatar,
            Sender::Peer => &self.peer_avatar,
        };

        match handle {
            Some(handle) => image(handle.clone())
                .width(Length::Fixed(AVATAR_SIZE))
                .height(Length::Fixed(AVATAR_SIZE))
                .into(),
            None => {
                let initial = match sender {
                    Sender::Me => "M".to_string(),
                    Sender::Peer => self
                        .config
                        .peer_name
                        .chars()
                        .next()
                        .unwrap_or('?')
                        .to_uppercase()
                        .to_string(),
                };
                container(text(initial).size(16))
                    .width(Length::Fixed(AVATAR_SIZE))
                    .height(Length::Fixed(AVATAR_SIZE))
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center)
                    .style(avatar_placeholder_style)
                    .into()
            }
        }
    }

    fn photo_message<'a>(&'a self, index: usize, caption: Option<&'a str>) -> Element<'a, Message> {
        let preview: Element<'a, Message> = match self.photo_handles.get(&index) {
            Some(Some(handle)) => image(handle.clone())
                .height(Length::Fixed(PHOTO_PREVIEW_HEIGHT))
                .into(),
            _ => container(text("photo unavailable").size(13))
                .width(Length::Fixed(PHOTO_PREVIEW_HEIGHT))
                .height(Length::Fixed(PHOTO_PREVIEW_HEIGHT))
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center)
                .style(photo_placeholder_style)
                .into(),
        };

        let mut content = column![
            mouse_area(preview).on_press(Message::PhotoClicked(index))
        ]
        .spacing(4);
        if let Some(caption) = caption {
            content = content.push(text(caption).size(13));
        }
        content.into()
    }

    /// Both card variants route through the same controller messages; they
    /// only differ visually.
    fn audio_card<'a>(
        &'a self,
        index: usize,
        attachment: &'a AudioAttachment,
    ) -> Element<'a, Message> {
        match attachment.layout {
            CardLayout::Compact => self.compact_card(index, attachment),
            CardLayout::Legacy => self.legacy_card(index, attachment),
        }
    }

    fn compact_card<'a>(
        &'a self,
        index: usize,
        attachment: &'a AudioAttachment,
    ) -> Element<'a, Message> {
        let center = column![
            text(attachment.title.as_str()).size(15),
            text(attachment.artist.as_str()).size(12),
            self.progress_control(index),
        ]
        .spacing(4);

        let card = container(
            row![center, self.play_button(index)]
                .spacing(12)
                .align_y(Vertical::Center),
        )
        .padding(12)
        .style(compact_card_style);

        mouse_area(card)
            .on_press(Message::CardActivated(index))
            .into()
    }

    fn legacy_card<'a>(
        &'a self,
        index: usize,
        attachment: &'a AudioAttachment,
    ) -> Element<'a, Message> {
        let icon = if self.player.card_is_playing(index) {
            "❚❚"
        } else {
            "▶"
        };

        let card = container(
            row![
                text(icon).size(18),
                column![
                    text(attachment.title.as_str()).size(14),
                    self.progress_control(index)
                ]
                .spacing(4),
            ]
            .spacing(10)
            .align_y(Vertical::Center),
        )
        .padding(10)
        .style(legacy_card_style);

        mouse_area(card)
            .on_press(Message::CardActivated(index))
            .into()
    }

    fn play_button(&self, index: usize) -> Element<'_, Message> {
        let label = match self.player.lifecycle {
            PlayerLifecycle::Playing { card } if card == index => "❚❚",
            PlayerLifecycle::Starting { card, .. } if card == index => "…",
            _ => "▶",
        };
        button(text(label).size(14))
            .on_press(Message::CardActivated(index))
            .style(button::success)
            .into()
    }

    fn progress_control(&self, index: usize) -> Element<'_, Message> {
        let fraction = self.player.display_fraction(index);
        let filled = fraction * PROGRESS_TRACK_WIDTH;
        let handle_offset = (fraction * (PROGRESS_TRACK_WIDTH - PROGRESS_HANDLE_SIZE)).max(0.0);

        let bar = stack![
            container(Space::new(Length::Fill, Length::Fixed(PROGRESS_TRACK_HEIGHT)))
                .style(progress_track_style),
            container(Space::new(
                Length::Fixed(filled),
                Length::Fixed(PROGRESS_TRACK_HEIGHT),
            ))
            .style(progress_fill_style),
        ]
        .width(Length::Fixed(PROGRESS_TRACK_WIDTH))
        .height(Length::Fixed(PROGRESS_TRACK_HEIGHT));

        let handle = row![
            Space::new(Length::Fixed(handle_offset), Length::Fixed(PROGRESS_HANDLE_SIZE)),
            container(Space::new(
                Length::Fixed(PROGRESS_HANDLE_SIZE),
                Length::Fixed(PROGRESS_HANDLE_SIZE),
            ))
            .style(progress_handle_style),
        ];

        let control = stack![
            container(bar)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(Vertical::Center),
            container(handle)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_y(Vertical::Center),
        ]
        .width(Length::Fixed(PROGRESS_TRACK_WIDTH))
        .height(Length::Fixed(PROGRESS_HANDLE_SIZE));

        mouse_area(control)
            .on_move(move |point| Message::ScrubHovered {
                card: index,
                fraction: point.x / PROGRESS_TRACK_WIDTH,
            })
            .on_press(Message::ScrubPressed { card: index })
            .into()
    }

    fn input_bar(&self) -> Element<'_, Message> {
        let keyboard_toggle = button(text("⌨").size(16)).on_press(if self.layout.input_focused {
            Message::InputBlurred
        } else {
            Message::InputFocused
        });

        let draft = text_input("Message", &self.conversation.draft)
            .id(DRAFT_INPUT_ID.clone())
            .on_input(Message::DraftChanged)
            .on_submit(Message::SendDraft)
            .width(Length::Fill);

        let voice = button(text("🎤").size(16)).on_press(Message::ToolPressed(ToolButton::Voice));
        let emoji = button(text("😊").size(16)).on_press(Message::ToolPressed(ToolButton::Emoji));

        // The trailing slot swaps between "more tools" and "send" depending
        // on whether the draft has content.
        let trailing: Element<'_, Message> = if self.conversation.can_send() {
            button("Send")
                .on_press(Message::SendDraft)
                .style(button::success)
                .into()
        } else {
            button(text("+").size(16))
                .on_press(Message::ToolPressed(ToolButton::Attach))
                .into()
        };

        container(
            row![keyboard_toggle, voice, draft, emoji, trailing]
                .spacing(8)
                .align_y(Vertical::Center),
        )
        .width(Length::Fill)
        .height(Length::Fixed(INPUT_BAR_HEIGHT))
        .padding([0, 12])
        .align_y(Vertical::Center)
        .style(input_bar_style)
        .into()
    }

    fn keyboard_panel(&self) -> Element<'_, Message> {
        container(text("· · ·  on-screen keyboard  · · ·").size(14))
            .width(Length::Fill)
            .height(Length::Fixed(self.config.keyboard_height))
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .style(keyboard_panel_style)
            .into()
    }

    fn toast_layer(&self) -> Element<'_, Message> {
        let mut toasts = Column::new().spacing(8);
        for toast in &self.ui.toasts {
            let id = toast.id;
            toasts = toasts.push(
                mouse_area(
                    container(text(toast.body.as_str()).size(14))
                        .padding([10, 18])
                        .style(toast_style),
                )
                .on_press(Message::ToastDismissed(id)),
            );
        }

        container(toasts)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center)
            .into()
    }

    fn lightbox_layer(&self, index: usize) -> Element<'_, Message> {
        let content: Element<'_, Message> = match self.photo_handles.get(&index) {
            Some(Some(handle)) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            _ => text("photo unavailable").size(16).into(),
        };

        opaque(
            mouse_area(
                container(content)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .padding(24)
                    .align_x(Horizontal::Center)
                    .align_y(Vertical::Center)
                    .style(lightbox_backdrop_style),
            )
            .on_press(Message::LightboxDismissed),
        )
    }
}

fn timestamp_row(message: &ChatMessage) -> Element<'_, Message> {
    container(text(message.sent_at.format("%H:%M").to_string()).size(12))
        .width(Length::Fill)
        .height(Length::Fixed(TIMESTAMP_ROW_HEIGHT))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .into()
}

fn header_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        ..container::Style::default()
    }
}

fn bubble_style(theme: &Theme, mine: bool) -> container::Style {
    let palette = theme.extended_palette();
    let background = if mine {
        palette.success.weak.color
    } else {
        palette.background.weak.color
    };
    container::Style {
        background: Some(Background::Color(background)),
        border: border::rounded(10.0),
        ..container::Style::default()
    }
}

fn compact_card_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        border: border::rounded(12.0),
        ..container::Style::default()
    }
}

fn legacy_card_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: border::rounded(6.0).color(palette.background.strong.color).width(1),
        ..container::Style::default()
    }
}

fn progress_track_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.strong.color)),
        border: border::rounded(PROGRESS_TRACK_HEIGHT / 2.0),
        ..container::Style::default()
    }
}

fn progress_fill_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.success.base.color)),
        border: border::rounded(PROGRESS_TRACK_HEIGHT / 2.0),
        ..container::Style::default()
    }
}

fn progress_handle_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: border::rounded(PROGRESS_HANDLE_SIZE / 2.0)
            .color(palette.background.strong.color)
            .width(1),
        ..container::Style::default()
    }
}

fn avatar_placeholder_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.primary.weak.color)),
        text_color: Some(palette.primary.weak.text),
        border: border::rounded(AVATAR_SIZE / 2.0),
        ..container::Style::default()
    }
}

fn photo_placeholder_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        border: border::rounded(8.0),
        ..container::Style::default()
    }
}

fn input_bar_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.weak.color)),
        ..container::Style::default()
    }
}

fn keyboard_panel_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.strong.color)),
        ..container::Style::default()
    }
}

fn toast_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.secondary.base.color)),
        text_color: Some(palette.secondary.base.text),
        border: border::rounded(6.0),
        ..container::Style::default()
    }
}

fn lightbox_backdrop_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(iced::Color {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.85,
        })),
        ..container::Style::default()
    }
}
