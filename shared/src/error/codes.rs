//! Unified error codes for the Ladle platform
//!
//! This module defines all error codes used across the API server and
//! its clients. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: User and subscription errors
//! - 4xxx: Recipe errors
//! - 5xxx: Favorite and shopping-cart errors
//! - 6xxx: Catalog and upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Only the recipe author may modify or delete it
    NotRecipeAuthor = 2002,

    // ==================== 3xxx: User ====================
    /// User not found
    UserNotFound = 3001,
    /// Email is already registered
    EmailExists = 3002,
    /// Password too short
    PasswordTooShort = 3003,

    // ==================== 31xx: Subscription ====================
    /// Cannot subscribe to yourself
    SelfSubscription = 3101,
    /// Already subscribed to this user
    AlreadySubscribed = 3102,
    /// Not subscribed to this user
    NotSubscribed = 3103,

    // ==================== 4xxx: Recipe ====================
    /// Recipe not found
    RecipeNotFound = 4001,
    /// Recipe must have at least one tag
    EmptyTagList = 4002,
    /// Tags must not repeat
    DuplicateTag = 4003,
    /// Recipe must have at least one ingredient
    EmptyIngredientList = 4004,
    /// Ingredients must not repeat
    DuplicateIngredient = 4005,
    /// Cooking time must be at least 1
    InvalidCookingTime = 4006,
    /// Ingredient amount must be at least 1
    InvalidIngredientAmount = 4007,

    // ==================== 5xxx: Favorite ====================
    /// Recipe is already in favorites
    AlreadyFavorited = 5001,
    /// Recipe is not in favorites
    NotFavorited = 5002,

    // ==================== 51xx: Shopping cart ====================
    /// Recipe is already in the shopping cart
    AlreadyInCart = 5101,
    /// Recipe is not in the shopping cart
    NotInCart = 5102,
    /// Shopping cart is empty
    CartEmpty = 5103,

    // ==================== 6xxx: Catalog ====================
    /// Tag not found
    TagNotFound = 6001,
    /// Ingredient not found
    IngredientNotFound = 6101,

    // ==================== 65xx: File Upload ====================
    /// File too large
    FileTooLarge = 6501,
    /// Unsupported file format
    UnsupportedFileFormat = 6502,
    /// Invalid/corrupted image file
    InvalidImageFile = 6503,
    /// Image processing failed
    ImageProcessingFailed = 6508,
    /// File storage failed
    FileStorageFailed = 6509,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::NotRecipeAuthor => "Only the author may modify this recipe",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "Email is already registered",
            ErrorCode::PasswordTooShort => "Password must be at least 8 characters",

            // Subscription
            ErrorCode::SelfSubscription => "Cannot subscribe to yourself",
            ErrorCode::AlreadySubscribed => "Already subscribed to this user",
            ErrorCode::NotSubscribed => "Not subscribed to this user",

            // Recipe
            ErrorCode::RecipeNotFound => "Recipe not found",
            ErrorCode::EmptyTagList => "Recipe must have at least one tag",
            ErrorCode::DuplicateTag => "Tags must not repeat",
            ErrorCode::EmptyIngredientList => "Recipe must have at least one ingredient",
            ErrorCode::DuplicateIngredient => "Ingredients must not repeat",
            ErrorCode::InvalidCookingTime => "Cooking time must be at least 1 minute",
            ErrorCode::InvalidIngredientAmount => "Ingredient amount must be at least 1",

            // Favorite
            ErrorCode::AlreadyFavorited => "Recipe is already in favorites",
            ErrorCode::NotFavorited => "Recipe is not in favorites",

            // Shopping cart
            ErrorCode::AlreadyInCart => "Recipe is already in the shopping cart",
            ErrorCode::NotInCart => "Recipe is not in the shopping cart",
            ErrorCode::CartEmpty => "Shopping cart is empty",

            // Catalog
            ErrorCode::TagNotFound => "Tag not found",
            ErrorCode::IngredientNotFound => "Ingredient not found",

            // File Upload
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::NotRecipeAuthor),

            // User
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::EmailExists),
            3003 => Ok(ErrorCode::PasswordTooShort),

            // Subscription
            3101 => Ok(ErrorCode::SelfSubscription),
            3102 => Ok(ErrorCode::AlreadySubscribed),
            3103 => Ok(ErrorCode::NotSubscribed),

            // Recipe
            4001 => Ok(ErrorCode::RecipeNotFound),
            4002 => Ok(ErrorCode::EmptyTagList),
            4003 => Ok(ErrorCode::DuplicateTag),
            4004 => Ok(ErrorCode::EmptyIngredientList),
            4005 => Ok(ErrorCode::DuplicateIngredient),
            4006 => Ok(ErrorCode::InvalidCookingTime),
            4007 => Ok(ErrorCode::InvalidIngredientAmount),

            // Favorite
            5001 => Ok(ErrorCode::AlreadyFavorited),
            5002 => Ok(ErrorCode::NotFavorited),

            // Shopping cart
            5101 => Ok(ErrorCode::AlreadyInCart),
            5102 => Ok(ErrorCode::NotInCart),
            5103 => Ok(ErrorCode::CartEmpty),

            // Catalog
            6001 => Ok(ErrorCode::TagNotFound),
            6101 => Ok(ErrorCode::IngredientNotFound),

            // File Upload
            6501 => Ok(ErrorCode::FileTooLarge),
            6502 => Ok(ErrorCode::UnsupportedFileFormat),
            6503 => Ok(ErrorCode::InvalidImageFile),
            6508 => Ok(ErrorCode::ImageProcessingFailed),
            6509 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
