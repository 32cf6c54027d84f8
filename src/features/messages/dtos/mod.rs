mod contact_message_dto;

pub use contact_message_dto::{
    ContactMessageDto, CreateContactMessageDto, PublicContactMessageDto,
};
