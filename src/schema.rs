// Table layout mirrored by the DDL in `registry.rs`.

diesel::table! {
    branches (id) {
        id -> Integer,
        name -> Text,
        addr -> Text,
    }
}

diesel::table! {
    class_lists (id) {
        id -> Integer,
        course_id -> Integer,
        semester -> SmallInt,
        branch_id -> Integer,
        class_type -> SmallInt,
        start_date -> Date,
        end_date -> Nullable<Date>,
    }
}

diesel::table! {
    class_teachers (class_id, user_profile_id) {
        class_id -> Integer,
        user_profile_id -> Integer,
    }
}

diesel::table! {
    course_records (id) {
        id -> Integer,
        class_id -> Integer,
        day_num -> SmallInt,
        teacher_id -> Integer,
        has_homework -> Bool,
        homework_title -> Nullable<Text>,
        homework_content -> Nullable<Text>,
        outline -> Text,
        date -> Date,
    }
}

diesel::table! {
    courses (id) {
        id -> Integer,
        name -> Text,
        price -> SmallInt,
        period -> SmallInt,
        outline -> Text,
        date -> Timestamp,
    }
}

diesel::table! {
    customer_follow_ups (id) {
        id -> Integer,
        customer_id -> Integer,
        content -> Text,
        consultant_id -> Integer,
        intention -> SmallInt,
        date -> Timestamp,
    }
}

diesel::table! {
    customer_tags (customer_id, tag_id) {
        customer_id -> Integer,
        tag_id -> Integer,
    }
}

diesel::table! {
    customers (id) {
        id -> Integer,
        name -> Nullable<Text>,
        qq -> Text,
        qq_name -> Nullable<Text>,
        phone -> Nullable<Text>,
        source -> SmallInt,
        referral_from -> Nullable<Text>,
        consult_course_id -> Integer,
        content -> Text,
        consultant_id -> Integer,
        note -> Nullable<Text>,
        date -> Timestamp,
    }
}

diesel::table! {
    enrollments (id) {
        id -> Integer,
        customer_id -> Integer,
        class_id -> Integer,
        consultant_id -> Integer,
        contract_agreed -> Bool,
        contract_approved -> Bool,
        date -> Timestamp,
    }
}

diesel::table! {
    menus (id) {
        id -> Integer,
        name -> Text,
        url_name -> Text,
    }
}

diesel::table! {
    payments (id) {
        id -> Integer,
        customer_id -> Integer,
        amount -> Integer,
        course_id -> Integer,
        consultant_id -> Integer,
        date -> Timestamp,
    }
}

diesel::table! {
    role_menus (role_id, menu_id) {
        role_id -> Integer,
        menu_id -> Integer,
    }
}

diesel::table! {
    roles (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    study_records (id) {
        id -> Integer,
        enrollment_id -> Integer,
        course_record_id -> Integer,
        attendance -> SmallInt,
        score -> SmallInt,
        memo -> Nullable<Text>,
        date -> Date,
    }
}

diesel::table! {
    tags (id) {
        id -> Integer,
        name -> Text,
    }
}

diesel::table! {
    user_profile_roles (user_profile_id, role_id) {
        user_profile_id -> Integer,
        role_id -> Integer,
    }
}

diesel::table! {
    user_profiles (id) {
        id -> Integer,
        user_id -> Integer,
        name -> Text,
    }
}

diesel::joinable!(class_lists -> branches (branch_id));
diesel::joinable!(class_lists -> courses (course_id));
diesel::joinable!(class_teachers -> class_lists (class_id));
diesel::joinable!(class_teachers -> user_profiles (user_profile_id));
diesel::joinable!(course_records -> class_lists (class_id));
diesel::joinable!(course_records -> user_profiles (teacher_id));
diesel::joinable!(customer_follow_ups -> customers (customer_id));
diesel::joinable!(customer_follow_ups -> user_profiles (consultant_id));
diesel::joinable!(customer_tags -> customers (customer_id));
diesel::joinable!(customer_tags -> tags (tag_id));
diesel::joinable!(customers -> courses (consult_course_id));
diesel::joinable!(customers -> user_profiles (consultant_id));
diesel::joinable!(enrollments -> class_lists (class_id));
diesel::joinable!(enrollments -> customers (customer_id));
diesel::joinable!(enrollments -> user_profiles (consultant_id));
diesel::joinable!(payments -> courses (course_id));
diesel::joinable!(payments -> customers (customer_id));
diesel::joinable!(payments -> user_profiles (consultant_id));
diesel::joinable!(role_menus -> menus (menu_id));
diesel::joinable!(role_menus -> roles (role_id));
diesel::joinable!(study_records -> course_records (course_record_id));
diesel::joinable!(study_records -> enrollments (enrollment_id));
diesel::joinable!(user_profile_roles -> roles (role_id));
diesel::joinable!(user_profile_roles -> user_profiles (user_profile_id));

diesel::allow_tables_to_appear_in_same_query!(
    branches,
    class_lists,
    class_teachers,
    course_records,
    courses,
    customer_follow_ups,
    customer_tags,
    customers,
    enrollments,
    menus,
    payments,
    role_menus,
    roles,
    study_records,
    tags,
    user_profile_roles,
    user_profiles,
);
